//! 업스트림 에러 분류 테이블
//!
//! Frappe 는 구조화된 에러 코드 대신 `exc_type`(예외 클래스 이름)과
//! 사람이 읽는 메시지를 돌려준다. 분류 순서:
//!
//! 1. `exc_type` 테이블 (구조화된 정보가 있으면 우선)
//! 2. 메시지 substring 테이블 (대소문자 무시, 선언 순서대로 첫 매칭)
//! 3. 업스트림 HTTP 상태 코드
//! 4. 기본값: Unknown (500)

use axum::http::StatusCode;

use super::ErrorKind;
use crate::services::erp::{ErpError, UpstreamFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamCategory {
    NotFound,
    PermissionDenied,
    Duplicate,
    ValidationFailed,
    Unknown,
}

const EXC_TYPES: &[(&str, UpstreamCategory)] = &[
    ("DoesNotExistError", UpstreamCategory::NotFound),
    ("PageDoesNotExistError", UpstreamCategory::NotFound),
    ("PermissionError", UpstreamCategory::PermissionDenied),
    ("DuplicateEntryError", UpstreamCategory::Duplicate),
    ("UniqueValidationError", UpstreamCategory::Duplicate),
    ("MandatoryError", UpstreamCategory::ValidationFailed),
    ("ValidationError", UpstreamCategory::ValidationFailed),
    ("LinkValidationError", UpstreamCategory::ValidationFailed),
];

const MESSAGE_PATTERNS: &[(&str, UpstreamCategory)] = &[
    ("not found", UpstreamCategory::NotFound),
    ("does not exist", UpstreamCategory::NotFound),
    ("permission", UpstreamCategory::PermissionDenied),
    ("not permitted", UpstreamCategory::PermissionDenied),
    ("access", UpstreamCategory::PermissionDenied),
    ("duplicate", UpstreamCategory::Duplicate),
    ("already exists", UpstreamCategory::Duplicate),
    ("required", UpstreamCategory::ValidationFailed),
    ("mandatory", UpstreamCategory::ValidationFailed),
];

impl UpstreamCategory {
    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamCategory::NotFound => StatusCode::NOT_FOUND,
            UpstreamCategory::PermissionDenied => StatusCode::FORBIDDEN,
            UpstreamCategory::Duplicate => StatusCode::CONFLICT,
            UpstreamCategory::ValidationFailed => StatusCode::BAD_REQUEST,
            UpstreamCategory::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn friendly_message(&self) -> &'static str {
        match self {
            UpstreamCategory::NotFound => "Resource not found",
            UpstreamCategory::PermissionDenied => "Permission denied",
            UpstreamCategory::Duplicate => "Resource already exists",
            UpstreamCategory::ValidationFailed => "Validation failed",
            UpstreamCategory::Unknown => "ERP system error",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UpstreamCategory::NotFound => ErrorKind::UpstreamNotFound,
            UpstreamCategory::PermissionDenied => ErrorKind::UpstreamPermissionDenied,
            UpstreamCategory::Duplicate => ErrorKind::UpstreamDuplicate,
            UpstreamCategory::ValidationFailed => ErrorKind::UpstreamValidationFailed,
            UpstreamCategory::Unknown => ErrorKind::UpstreamUnknown,
        }
    }
}

pub fn category_from_exc_type(exc_type: &str) -> Option<UpstreamCategory> {
    EXC_TYPES
        .iter()
        .find(|(name, _)| *name == exc_type)
        .map(|(_, category)| *category)
}

pub fn category_from_message(message: &str) -> Option<UpstreamCategory> {
    let message = message.to_lowercase();
    MESSAGE_PATTERNS
        .iter()
        .find(|(pattern, _)| message.contains(pattern))
        .map(|(_, category)| *category)
}

pub fn category_from_status(status: u16) -> Option<UpstreamCategory> {
    match status {
        404 => Some(UpstreamCategory::NotFound),
        403 => Some(UpstreamCategory::PermissionDenied),
        409 => Some(UpstreamCategory::Duplicate),
        417 | 422 => Some(UpstreamCategory::ValidationFailed),
        _ => None,
    }
}

pub fn classify_upstream(failure: &UpstreamFailure) -> UpstreamCategory {
    failure
        .exc_type
        .as_deref()
        .and_then(category_from_exc_type)
        .or_else(|| category_from_message(&failure.message))
        .or_else(|| category_from_status(failure.status))
        .unwrap_or(UpstreamCategory::Unknown)
}

/// 어댑터 에러 전체 분류
///
/// 업스트림 응답이 있는 경우만 테이블을 탄다. transport / decode 에러 텍스트에는
/// 요청 URL(문서 name 포함)이 섞일 수 있으므로 항상 Unknown.
pub fn classify_erp_error(err: &ErpError) -> UpstreamCategory {
    match err {
        ErpError::Upstream(failure) => classify_upstream(failure),
        _ => UpstreamCategory::Unknown,
    }
}
