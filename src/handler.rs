//! Request Handler Wrapper
//!
//! # Interview Q&A
//!
//! Q: 라우트마다 try/catch 를 쓰지 않고 래퍼를 두는 이유는?
//! A: 모든 라우트에 동일한 실행 계약을 보장하기 위해
//!    1. ERP 설정 검사 (없으면 설정 에러)
//!    2. `require_auth` 면 로그인 사용자 확인 (실패 시 업스트림 호출 0회)
//!    3. 비즈니스 클로저 실행
//!    4. 성공/실패 → 고정된 JSON 봉투 + HTTP 상태
//!
//! Q: 재시도나 타임아웃 복구는?
//! A: 없음. 요청 1건 = 업스트림 호출 체인 1회 (fire-once)
//!    - 에러는 전부 여기까지 올라와 분류/직렬화됨
//!    - 클라이언트는 stack trace 를 볼 수 없고, 로그에만 남음

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::{
    error::ApiError,
    services::erp::{ErpClient, GUEST_USER},
    types::ApiResponse,
    AppState,
};

/// 요청 옵션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub require_auth: bool,
}

impl RequestOptions {
    /// 조회용 (기본값)
    pub const PUBLIC: Self = Self { require_auth: false };
    /// 변경(생성/수정/삭제)용
    pub const AUTHENTICATED: Self = Self { require_auth: true };
}

/// 라우트 비즈니스 클로저 실행 + 결과를 봉투로 변환
///
/// # Flow
///
/// ```text
/// endpoint log → config check → (auth check) → producer(erp)
///     Ok(data) → 200 {success: true, data, message}
///     Err(e)   → classify → {success: false, error, details, code, statusCode}
/// ```
pub async fn handle_api_request<T, F, Fut>(
    state: &AppState,
    endpoint: &'static str,
    options: RequestOptions,
    producer: F,
) -> Response
where
    T: Serialize,
    F: FnOnce(Arc<ErpClient>) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let started = Instant::now();
    tracing::info!(endpoint, timestamp = %Utc::now().to_rfc3339(), "API request");

    match execute(state, options, producer).await {
        Ok(data) => {
            tracing::info!(
                endpoint,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "API request successful"
            );
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => {
            let classified = err.classify();
            if classified.status.is_server_error() {
                tracing::error!(
                    endpoint,
                    status = classified.status.as_u16(),
                    code = classified.kind.as_code(),
                    details = %classified.details,
                    cause = ?err,
                    "API request failed"
                );
            } else {
                tracing::warn!(
                    endpoint,
                    status = classified.status.as_u16(),
                    code = classified.kind.as_code(),
                    details = %classified.details,
                    "API request failed"
                );
            }
            classified.into_response()
        }
    }
}

async fn execute<T, F, Fut>(state: &AppState, options: RequestOptions, producer: F) -> Result<T, ApiError>
where
    F: FnOnce(Arc<ErpClient>) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let erp = state.erp()?;

    if options.require_auth {
        let user = authenticate(&erp).await?;
        tracing::debug!(%user, "authenticated");
    }

    producer(erp).await
}

/// ERP 라우트 공통 설정 검사 (route layer)
///
/// extractor 보다 먼저 실행되므로, 설정이 없으면 body/query 파싱 결과와
/// 무관하게 항상 설정 에러로 응답한다.
pub async fn require_erp_config(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Err(err) = state.erp() {
        return err.into_response();
    }
    next.run(request).await
}

/// 로그인 사용자 확인
///
/// - 조회 실패 (401/403, 연결 실패 등) → `AuthenticationFailed`
/// - "Guest" 또는 빈 값 → `AuthenticationRequired`
pub async fn authenticate(erp: &ErpClient) -> Result<String, ApiError> {
    match erp.auth().get_logged_in_user().await {
        Ok(user) if user.is_empty() || user == GUEST_USER => Err(ApiError::AuthenticationRequired),
        Ok(user) => Ok(user),
        Err(err) => Err(ApiError::AuthenticationFailed(err.to_string())),
    }
}
