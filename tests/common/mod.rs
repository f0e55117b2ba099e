//! Integration test helpers
//!
//! - `FakeErp`: axum 으로 만든 in-memory Frappe REST API (ephemeral port)
//! - `gateway`: 설정을 주입한 게이트웨이 Router
//! - `send`: Router 에 요청을 보내고 봉투 불변식을 검사

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use erp_gateway_api::{routes, AppState, Config};

// ============ Fake ERP ============

#[derive(Default)]
pub struct FakeState {
    docs: Mutex<HashMap<(String, String), Value>>,
    /// 조회 시 500 을 돌려줄 문서 name
    failing: Mutex<HashSet<String>>,
    logged_user: Mutex<String>,
    next_id: AtomicUsize,
    /// POST/PUT/DELETE /api/resource 호출 수
    pub mutations: AtomicUsize,
    pub upserts: AtomicUsize,
}

impl FakeState {
    pub fn insert(&self, doctype: &str, doc: Value) {
        let name = doc["name"].as_str().unwrap_or_default().to_string();
        self.docs.lock().unwrap().insert((doctype.to_string(), name), doc);
    }

    pub fn doc(&self, doctype: &str, name: &str) -> Option<Value> {
        self.docs
            .lock()
            .unwrap()
            .get(&(doctype.to_string(), name.to_string()))
            .cloned()
    }

    pub fn count(&self, doctype: &str) -> usize {
        self.docs.lock().unwrap().keys().filter(|(kind, _)| kind == doctype).count()
    }

    pub fn fail_on(&self, name: &str) {
        self.failing.lock().unwrap().insert(name.to_string());
    }

    pub fn set_user(&self, user: &str) {
        *self.logged_user.lock().unwrap() = user.to_string();
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn assign_name(&self, doctype: &str, doc: &Map<String, Value>) -> String {
        let natural_key = match doctype {
            "Customer" => doc.get("customer_name"),
            "Supplier" => doc.get("supplier_name"),
            "Item" => doc.get("item_code"),
            _ => None,
        };
        if let Some(Value::String(name)) = natural_key {
            return name.clone();
        }

        let prefix = match doctype {
            "Sales Invoice" => "SINV",
            "Asset" => "AST",
            _ => "DOC",
        };
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{:04}", prefix, id)
    }
}

pub struct FakeErp {
    pub state: Arc<FakeState>,
    pub base_url: String,
}

fn not_found(doctype: &str, name: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "exc_type": "DoesNotExistError",
            "exception": format!("frappe.exceptions.DoesNotExistError: {} {} not found", doctype, name),
        })),
    )
        .into_response()
}

async fn logged_user(State(state): State<Arc<FakeState>>) -> Json<Value> {
    Json(json!({"message": state.logged_user.lock().unwrap().clone()}))
}

async fn ping() -> Json<Value> {
    Json(json!({"message": "pong"}))
}

async fn list_docs(
    State(state): State<Arc<FakeState>>,
    Path(doctype): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let fields: Vec<String> = query
        .get("fields")
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();
    let limit: usize = query
        .get("limit_page_length")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(20);

    let docs = state.docs.lock().unwrap();
    let mut rows: Vec<&Value> = docs
        .iter()
        .filter(|((kind, _), _)| *kind == doctype)
        .map(|(_, doc)| doc)
        .collect();
    rows.sort_by_key(|doc| doc["name"].as_str().unwrap_or_default().to_string());

    let rows: Vec<Value> = rows
        .into_iter()
        .take(limit)
        .map(|doc| {
            if fields.is_empty() {
                return json!({"name": doc["name"]});
            }
            let projected: Map<String, Value> = fields
                .iter()
                .filter_map(|field| doc.get(field).map(|value| (field.clone(), value.clone())))
                .collect();
            Value::Object(projected)
        })
        .collect();

    Json(json!({"data": rows}))
}

async fn create_doc(
    State(state): State<Arc<FakeState>>,
    Path(doctype): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    let Value::Object(mut doc) = body else {
        return (StatusCode::BAD_REQUEST, Json(json!({"exception": "body must be an object"}))).into_response();
    };

    let name = state.assign_name(&doctype, &doc);
    if state.doc(&doctype, &name).is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "exc_type": "DuplicateEntryError",
                "exception": format!("frappe.exceptions.DuplicateEntryError: {} {} already exists", doctype, name),
            })),
        )
            .into_response();
    }

    doc.insert("name".to_string(), json!(name));
    doc.insert("docstatus".to_string(), json!(0));
    doc.insert("modified".to_string(), json!("2026-01-01 00:00:00"));
    let doc = Value::Object(doc);
    state.insert(&doctype, doc.clone());

    Json(json!({"data": doc})).into_response()
}

async fn get_doc(
    State(state): State<Arc<FakeState>>,
    Path((doctype, name)): Path<(String, String)>,
) -> Response {
    if state.failing.lock().unwrap().contains(&name) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"exception": "pymysql.err.OperationalError: connection lost"})),
        )
            .into_response();
    }
    match state.doc(&doctype, &name) {
        Some(doc) => Json(json!({"data": doc})).into_response(),
        None => not_found(&doctype, &name),
    }
}

async fn update_doc(
    State(state): State<Arc<FakeState>>,
    Path((doctype, name)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    state.upserts.fetch_add(1, Ordering::SeqCst);
    let Some(Value::Object(mut current)) = state.doc(&doctype, &name) else {
        return not_found(&doctype, &name);
    };
    if let Value::Object(fields) = body {
        current.extend(fields);
    }
    current.insert("name".to_string(), json!(name));
    let doc = Value::Object(current);
    state.insert(&doctype, doc.clone());

    Json(json!({"data": doc})).into_response()
}

async fn delete_doc(
    State(state): State<Arc<FakeState>>,
    Path((doctype, name)): Path<(String, String)>,
) -> Response {
    state.mutations.fetch_add(1, Ordering::SeqCst);
    match state.docs.lock().unwrap().remove(&(doctype.clone(), name.clone())) {
        Some(_) => Json(json!({"message": "ok"})).into_response(),
        None => not_found(&doctype, &name),
    }
}

fn set_docstatus(state: &FakeState, doctype: &str, name: &str, docstatus: i64) -> Option<Value> {
    let mut doc = state.doc(doctype, name)?;
    doc["docstatus"] = json!(docstatus);
    state.insert(doctype, doc.clone());
    Some(doc)
}

async fn submit(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    let doctype = body["doc"]["doctype"].as_str().unwrap_or("Sales Invoice").to_string();
    let name = body["doc"]["name"].as_str().unwrap_or_default().to_string();
    match set_docstatus(&state, &doctype, &name, 1) {
        Some(doc) => Json(json!({"message": doc})).into_response(),
        None => not_found(&doctype, &name),
    }
}

async fn cancel(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> Response {
    let doctype = body["doctype"].as_str().unwrap_or_default().to_string();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let submitted = state
        .doc(&doctype, &name)
        .map(|doc| doc["docstatus"] == 1)
        .unwrap_or(false);
    if !submitted {
        return (
            StatusCode::EXPECTATION_FAILED,
            Json(json!({
                "exc_type": "ValidationError",
                "_server_messages": json!([json!({"message": "Only submitted documents can be cancelled"}).to_string()]).to_string(),
            })),
        )
            .into_response();
    }
    set_docstatus(&state, &doctype, &name, 2);
    Json(json!({"message": null})).into_response()
}

/// ephemeral port 에 fake ERP 기동
pub async fn spawn_fake_erp() -> FakeErp {
    let state = Arc::new(FakeState::default());
    state.set_user("admin@example.com");

    let app = Router::new()
        .route("/api/method/frappe.auth.get_logged_user", get(logged_user))
        .route("/api/method/frappe.ping", get(ping))
        .route("/api/method/frappe.client.submit", post(submit))
        .route("/api/method/frappe.client.cancel", post(cancel))
        .route("/api/resource/:doctype", get(list_docs).post(create_doc))
        .route(
            "/api/resource/:doctype/:name",
            get(get_doc).put(update_doc).delete(delete_doc),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeErp {
        state,
        base_url: format!("http://{}", addr),
    }
}

// ============ Gateway ============

/// ERP base URL 을 주입한 게이트웨이 (None 이면 ERP 설정 전부 누락)
pub fn gateway(base_url: Option<&str>) -> Router {
    let base_url = base_url.map(str::to_string);
    let config = Config::from_lookup(move |key| match key {
        "ERP_BASE_URL" => base_url.clone(),
        "ERP_API_KEY" | "ERP_API_SECRET" => base_url.as_ref().map(|_| "test".to_string()),
        "ERP_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();
    routes::create_router(AppState::new(config).unwrap())
}

/// 봉투 불변식: data/error 중 정확히 하나, success 일치, statusCode 일치
pub fn assert_envelope(status: StatusCode, body: &Value) {
    let success = body["success"].as_bool().expect("success flag");
    assert_eq!(success, status.is_success(), "success flag mismatch: {}", body);
    if success {
        assert!(body.get("data").is_some(), "missing data: {}", body);
        assert!(body.get("error").is_none(), "unexpected error: {}", body);
        assert_eq!(body["message"], "Request successful");
    } else {
        assert!(body.get("data").is_none(), "unexpected data: {}", body);
        assert!(body["error"].is_string(), "missing error: {}", body);
        assert!(body["details"].is_string(), "missing details: {}", body);
        assert!(body["code"].is_string(), "missing code: {}", body);
        assert_eq!(body["statusCode"], status.as_u16());
    }
}

pub async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| panic!("non-JSON response ({}): {}", status, String::from_utf8_lossy(&bytes)));
    assert_envelope(status, &body);
    (status, body)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_raw(app, request).await
}
