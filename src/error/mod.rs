//! Error Handling Module
//!
//! Provides the HTTP-boundary error taxonomy and its mapping onto the failure envelope.
//! Uses thiserror for typed errors and tracing for structured logging.
//!
//! 핸들러에서 발생한 모든 에러는 여기로 모여 분류된 뒤 JSON 봉투로 직렬화된다.
//! 스택/원인 체인은 로그에만 기록하고 클라이언트에는 짧은 메시지 + details 만 전달.

pub mod classify;

use axum::{
    extract::rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::erp::ErpError;
use crate::types::ApiResponse;
use classify::{category_from_message, classify_erp_error};

/// API 에러 타입
///
/// # Design Decision
///
/// 각 variant 는 `ErrorKind` 하나로 분류되고, 업스트림 에러는
/// `classify` 테이블을 거쳐 HTTP 상태 코드가 결정된다.
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 설정 / 인증 ============
    #[error("ERP configuration missing: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    // ============ 업스트림 ============
    #[error("{0}")]
    Upstream(ErpError),

    // ============ 라우트 입력 검증 ============
    /// 라우트가 직접 던지는 에러 (메시지로 상태 코드 분류)
    #[error("{0}")]
    Application(String),

    /// 파싱 불가능한 body / query / path (항상 400)
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// body 크기 제한 초과 (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

/// 에러 분류 (응답의 `code` 필드)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ConfigurationMissing,
    AuthenticationRequired,
    AuthenticationFailed,
    UpstreamNotFound,
    UpstreamPermissionDenied,
    UpstreamDuplicate,
    UpstreamValidationFailed,
    UpstreamUnknown,
    ApplicationError,
    UnknownError,
}

impl ErrorKind {
    pub fn as_code(&self) -> &'static str {
        match self {
            ErrorKind::ConfigurationMissing => "CONFIGURATION_MISSING",
            ErrorKind::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ErrorKind::AuthenticationFailed => "AUTHENTICATION_FAILED",
            ErrorKind::UpstreamNotFound => "UPSTREAM_NOT_FOUND",
            ErrorKind::UpstreamPermissionDenied => "UPSTREAM_PERMISSION_DENIED",
            ErrorKind::UpstreamDuplicate => "UPSTREAM_DUPLICATE",
            ErrorKind::UpstreamValidationFailed => "UPSTREAM_VALIDATION_FAILED",
            ErrorKind::UpstreamUnknown => "UPSTREAM_UNKNOWN",
            ErrorKind::ApplicationError => "APPLICATION_ERROR",
            ErrorKind::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

/// 분류 결과 (상태 코드 + 짧은 메시지 + 원본 메시지)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    /// 클라이언트용 짧은 메시지
    pub error: String,
    /// 원본 에러 메시지
    pub details: String,
}

impl ApiError {
    pub fn application(message: impl Into<String>) -> Self {
        ApiError::Application(message.into())
    }

    /// "<field> is required" 형태 → 분류 테이블에서 400
    pub fn required(field: &str) -> Self {
        ApiError::Application(format!("{} is required", field))
    }

    pub fn classify(&self) -> ClassifiedError {
        let details = self.to_string();

        let (status, kind, error) = match self {
            ApiError::ConfigurationMissing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::ConfigurationMissing,
                "Server configuration error".to_string(),
            ),
            ApiError::AuthenticationRequired => (
                StatusCode::UNAUTHORIZED,
                ErrorKind::AuthenticationRequired,
                "Authentication required".to_string(),
            ),
            ApiError::AuthenticationFailed(_) => (
                StatusCode::UNAUTHORIZED,
                ErrorKind::AuthenticationFailed,
                "Authentication failed".to_string(),
            ),
            ApiError::Upstream(err) => {
                let category = classify_erp_error(err);
                (category.status(), category.kind(), category.friendly_message().to_string())
            }
            ApiError::Application(message) => match category_from_message(message) {
                Some(category) => (
                    category.status(),
                    ErrorKind::ApplicationError,
                    category.friendly_message().to_string(),
                ),
                None => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorKind::ApplicationError,
                    "Request failed".to_string(),
                ),
            },
            ApiError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                ErrorKind::ApplicationError,
                "Invalid request".to_string(),
            ),
            ApiError::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorKind::ApplicationError,
                "Payload too large".to_string(),
            ),
            ApiError::RouteNotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorKind::ApplicationError,
                "Route not found".to_string(),
            ),
            ApiError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorKind::ApplicationError,
                "Method not allowed".to_string(),
            ),
            ApiError::Unknown(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::UnknownError,
                "Unexpected error".to_string(),
            ),
        };

        ClassifiedError {
            status,
            kind,
            error,
            details,
        }
    }
}

impl IntoResponse for ClassifiedError {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> =
            ApiResponse::failure(self.error, self.details, self.kind, self.status);
        (self.status, Json(body)).into_response()
    }
}

/// 핸들러 래퍼를 거치지 않는 경로(extractor rejection, fallback)용
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let classified = self.classify();
        tracing::warn!(
            status = classified.status.as_u16(),
            code = classified.kind.as_code(),
            details = %classified.details,
            "Request rejected"
        );
        classified.into_response()
    }
}

/// ERP 어댑터 에러를 ApiError로 변환
impl From<ErpError> for ApiError {
    fn from(err: ErpError) -> Self {
        match err {
            ErpError::MissingConfiguration { missing } => ApiError::ConfigurationMissing(missing),
            other => ApiError::Upstream(other),
        }
    }
}

/// body 거부 → 413 은 유지, 나머지는 400
fn body_rejection(status: StatusCode, text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(text)
    } else {
        ApiError::InvalidInput(text)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        body_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        body_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}
