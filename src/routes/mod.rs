//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//! - `/health` - 헬스 체크 (ERP 설정/도달 여부)
//! - `/api/config/status` - 설정 진단 (값은 노출하지 않음)
//! - `/api/auth/me` - 로그인 사용자
//! - `/api/customers/*`, `/api/suppliers/*`, `/api/items/*` - 마스터 데이터
//! - `/api/sales-invoices/*` - 매출 인보이스 (+ submit/cancel)
//! - `/api/assets/*` - 고정자산
//! - `/api/files` - 파일 업로드

pub mod assets;
pub mod auth;
pub mod config_status;
pub mod customers;
pub mod files;
pub mod health;
pub mod items;
pub mod sales_invoices;
pub mod suppliers;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{error::ApiError, handler::require_erp_config, AppState};

/// 업로드 최대 크기
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// 라우터 생성
///
/// # Route Structure
///
/// ```text
/// GET  /health                          - 서버 상태 확인
/// GET  /api/config/status               - ERP 설정 여부
/// GET  /api/auth/me                     - 로그인 사용자
///
/// GET|POST        /api/customers        GET|PUT|DELETE /api/customers/:id
/// GET|POST        /api/suppliers        GET|PUT|DELETE /api/suppliers/:id
/// GET|POST        /api/items            GET|PUT|DELETE /api/items/:id
/// GET|POST        /api/sales-invoices   GET|PUT|DELETE /api/sales-invoices/:id
/// POST            /api/sales-invoices/:id/submit
/// POST            /api/sales-invoices/:id/cancel
/// GET|POST        /api/assets           GET|PUT|DELETE /api/assets/:id
/// POST            /api/files            - raw body 업로드
/// ```
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    // ERP 를 사용하는 라우트 (설정 누락 시 extractor 보다 먼저 거부)
    let erp_routes = Router::new()
        .route("/api/auth/me", get(auth::current_user))

        // Master data
        .route("/api/customers", get(customers::list_customers).post(customers::create_customer))
        .route(
            "/api/customers/:id",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/api/suppliers", get(suppliers::list_suppliers).post(suppliers::create_supplier))
        .route(
            "/api/suppliers/:id",
            get(suppliers::get_supplier)
                .put(suppliers::update_supplier)
                .delete(suppliers::delete_supplier),
        )
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route(
            "/api/items/:id",
            get(items::get_item).put(items::update_item).delete(items::delete_item),
        )

        // Sales invoices
        .route(
            "/api/sales-invoices",
            get(sales_invoices::list_sales_invoices).post(sales_invoices::create_sales_invoice),
        )
        .route(
            "/api/sales-invoices/:id",
            get(sales_invoices::get_sales_invoice)
                .put(sales_invoices::update_sales_invoice)
                .delete(sales_invoices::delete_sales_invoice),
        )
        .route("/api/sales-invoices/:id/submit", post(sales_invoices::submit_sales_invoice))
        .route("/api/sales-invoices/:id/cancel", post(sales_invoices::cancel_sales_invoice))

        // Assets
        .route("/api/assets", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/api/assets/:id",
            get(assets::get_asset).put(assets::update_asset).delete(assets::delete_asset),
        )

        // Files
        .route(
            "/api/files",
            post(files::upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_erp_config));

    Router::new()
        // Diagnostics (설정 없이도 동작)
        .route("/health", get(health::health_check))
        .route("/api/config/status", get(config_status::config_status))
        .merge(erp_routes)

        // 봉투 형식 404 / 405 (merge 이후에 등록해야 모든 경로에 적용됨)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)

        // 미들웨어
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // 상태 주입
        .with_state(state)
}

/// CORS 설정
///
/// 프로덕션: `ALLOWED_ORIGINS` 만 허용
/// 개발: localhost dev server 허용
fn cors_layer(state: &AppState) -> CorsLayer {
    if state.config.is_production() {
        let origins: Vec<HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        if origins.is_empty() {
            tracing::warn!("ALLOWED_ORIGINS is empty; cross-origin requests will be rejected");
        }
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:5173"), // Vite dev server
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:5173"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn route_not_found(method: Method, uri: Uri) -> Response {
    ApiError::RouteNotFound(format!("{} {}", method, uri.path())).into_response()
}

async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri.path())).into_response()
}
