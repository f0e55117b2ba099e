//! ERP Client Adapter
//!
//! # Interview Q&A
//!
//! Q: 왜 전역 싱글톤(static) 대신 AppState 로 주입하는가?
//! A: "프로세스당 하나의 설정된 커넥션" 요구사항은 유지하면서
//!    - 숨겨진 전역 상태 제거 → 테스트에서 클라이언트 교체 가능
//!    - main 에서 한 번 생성, `Arc<ErpClient>` 로 각 핸들러에 전달
//!
//! Q: 재시도/캐시는?
//! A: 없음. 모든 메서드는 업스트림 호출을 그대로 위임
//!    - 에러도 가공하지 않고 `ErpError` 로 올려보냄 → 분류는 handler 레이어
//!    - reqwest::Client 내부 커넥션 풀 외의 상태는 없음 (Send + Sync)
//!
//! # Sub-clients
//!
//! ```text
//! ErpClient
//!   ├── db()    /api/resource/{doctype}[/{name}]  + frappe.client.*
//!   ├── call()  /api/method/{method}
//!   ├── auth()  frappe.auth.get_logged_user
//!   └── file()  upload_file (multipart)
//! ```

mod auth;
mod call;
mod db;
mod error;
mod file;
mod query;

pub use auth::{AuthClient, GUEST_USER};
pub use call::CallClient;
pub use db::DocClient;
pub use error::{ErpError, UpstreamFailure};
pub use file::{FileClient, FileUpload};
pub use query::{filters_to_json, Filter, ListArgs, SortOrder};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::config::ErpSettings;

/// 설정이 완료된 ERP 클라이언트
pub struct ErpClient {
    http: Client,
    base_url: Url,
}

impl ErpClient {
    /// 설정에서 클라이언트 생성
    ///
    /// 필수 값(base URL, key, secret)이 하나라도 없으면 즉시 실패 (fail-fast)
    /// → 반쯤 설정된 클라이언트는 존재할 수 없음
    pub fn new(settings: &ErpSettings) -> Result<Self, ErpError> {
        let (Some(base_url), Some(api_key), Some(api_secret)) = (
            settings.base_url.as_deref(),
            settings.api_key.as_deref(),
            settings.api_secret.as_deref(),
        ) else {
            return Err(ErpError::MissingConfiguration {
                missing: settings.missing(),
            });
        };

        let base_url = Url::parse(base_url)
            .map_err(|e| ErpError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ErpError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut authorization = HeaderValue::from_str(&format!("token {}:{}", api_key, api_secret))
            .map_err(|_| {
                ErpError::InvalidCredentials("key/secret contain invalid header characters".to_string())
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 문서 CRUD + 목록
    pub fn db(&self) -> DocClient<'_> {
        DocClient::new(self)
    }

    /// whitelisted 서버 메서드 직접 호출
    pub fn call(&self) -> CallClient<'_> {
        CallClient::new(self)
    }

    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(self)
    }

    pub fn file(&self) -> FileClient<'_> {
        FileClient::new(self)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// base URL 뒤에 path segment 를 붙임 (doctype 공백 등은 percent-encoding)
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ErpError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ErpError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 요청 전송 + 응답 바디 JSON 파싱
    ///
    /// non-2xx 는 `ErpError::Upstream` 으로 그대로 전달
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Value, ErpError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let failure = UpstreamFailure::from_body(status.as_u16(), &body);
            tracing::debug!(status = failure.status, exc_type = ?failure.exc_type, "ERP returned an error");
            return Err(ErpError::Upstream(failure));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// `{"data": ...}` 응답에서 data 추출 (없으면 에러)
pub(crate) fn take_data(body: Value) -> Result<Value, ErpError> {
    match body {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| ErpError::Decode("response has no `data` field".to_string())),
        other => Err(ErpError::Decode(format!("expected an object, got {}", other))),
    }
}

/// `{"message": ...}` 응답에서 message 추출 (없으면 null)
pub(crate) fn take_message(body: Value) -> Value {
    match body {
        Value::Object(mut map) => map.remove("message").unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
