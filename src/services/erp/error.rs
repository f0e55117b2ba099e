//! ERP adapter errors
//!
//! 업스트림 에러는 여기서 분류하지 않는다. 원본 형태(status, exc_type, message)
//! 그대로 위로 전달하고, HTTP 상태 매핑은 `crate::error::classify` 담당.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErpError {
    #[error("ERP configuration missing: {}", .missing.join(", "))]
    MissingConfiguration { missing: Vec<&'static str> },

    #[error("Invalid ERP base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid ERP credentials: {0}")]
    InvalidCredentials(String),

    #[error("ERP transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Upstream(UpstreamFailure),

    #[error("Unexpected ERP response: {0}")]
    Decode(String),
}

/// non-2xx 업스트림 응답
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamFailure {
    pub status: u16,
    /// Frappe 예외 타입 (예: DoesNotExistError)
    pub exc_type: Option<String>,
    pub message: String,
}

impl std::fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.exc_type {
            Some(exc_type) => write!(f, "{} (HTTP {}): {}", exc_type, self.status, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

/// Frappe 에러 응답 바디
///
/// ```json
/// {
///   "exc_type": "DoesNotExistError",
///   "exception": "frappe.exceptions.DoesNotExistError: Customer C-1 not found",
///   "_server_messages": "[\"{\\\"message\\\": \\\"Customer C-1 not found\\\"}\"]"
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
struct FrappeErrorBody {
    exc_type: Option<String>,
    exception: Option<String>,
    #[serde(rename = "_server_messages")]
    server_messages: Option<String>,
    message: Option<Value>,
}

impl UpstreamFailure {
    /// 에러 응답 바디에서 사람이 읽을 메시지 추출
    ///
    /// 우선순위: `_server_messages` → `exception` → `message` → `HTTP <status>`
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed: FrappeErrorBody = serde_json::from_str(body).unwrap_or_default();

        let message = parsed
            .server_messages
            .as_deref()
            .and_then(first_server_message)
            .or_else(|| parsed.exception.as_deref().map(strip_exception_prefix))
            .or_else(|| match parsed.message {
                Some(Value::String(text)) if !text.is_empty() => Some(text),
                _ => None,
            })
            .unwrap_or_else(|| format!("HTTP {}", status));

        Self {
            status,
            exc_type: parsed.exc_type.filter(|exc| !exc.is_empty()),
            message,
        }
    }
}

/// `_server_messages`는 JSON 문자열 배열이고, 각 원소가 다시 JSON 문자열
fn first_server_message(raw: &str) -> Option<String> {
    let messages: Vec<String> = serde_json::from_str(raw).ok()?;
    messages.iter().find_map(|entry| {
        let text = match serde_json::from_str::<Value>(entry) {
            Ok(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => Some(entry.clone()),
        };
        text.filter(|text| !text.is_empty())
    })
}

/// "frappe.exceptions.DoesNotExistError: Customer C-1 not found" → "Customer C-1 not found"
fn strip_exception_prefix(exception: &str) -> String {
    let last_line = exception.trim().lines().last().unwrap_or_default();
    match last_line.split_once(": ") {
        Some((prefix, rest)) if !prefix.contains(' ') => rest.to_string(),
        _ => last_line.to_string(),
    }
}

impl From<reqwest::Error> for ErpError {
    fn from(err: reqwest::Error) -> Self {
        // URL 에는 문서 name 이 들어가므로 메시지에서 제외
        ErpError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for ErpError {
    fn from(err: serde_json::Error) -> Self {
        ErpError::Decode(err.to_string())
    }
}
