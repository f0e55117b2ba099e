//! Common Types Module
//!
//! 모든 엔드포인트가 공유하는 응답 봉투(envelope)와 목록 타입

use axum::http::StatusCode;
use serde::Serialize;

use crate::error::ErrorKind;

pub const SUCCESS_MESSAGE: &str = "Request successful";

/// API 응답 래퍼
///
/// `success` 와 `data` / `error` 중 하나만 채워지도록 생성자로만 만든다.
///
/// ```json
/// {"success": true, "data": {...}, "message": "Request successful"}
/// {"success": false, "error": "Resource not found", "details": "...", "code": "UPSTREAM_NOT_FOUND", "statusCode": 404}
/// ```
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success {
        success: bool,
        data: T,
        message: String,
    },
    Failure {
        success: bool,
        error: String,
        details: String,
        code: ErrorKind,
        #[serde(rename = "statusCode")]
        status_code: u16,
    },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse::Success {
            success: true,
            data,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(error: String, details: String, code: ErrorKind, status: StatusCode) -> Self {
        ApiResponse::Failure {
            success: false,
            error,
            details,
            code,
            status_code: status.as_u16(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }
}

/// 목록 응답
///
/// hydrate 단계에서 실패한 문서는 `items` 에서 빠지고 `failed` 에 기록된다.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub failed: Vec<HydrationFailure>,
}

impl<T> ListResponse<T> {
    /// hydrate 없이 목록 API 결과만으로 만든 응답
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            failed: Vec::new(),
        }
    }
}

/// hydrate 실패 항목
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HydrationFailure {
    pub id: String,
    pub error: String,
}

/// DELETE 응답
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// 목록 페이지 파라미터 기본값 / 상한
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 1000;

pub fn page_size(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}
