//! Envelope-aware extractors
//!
//! axum 기본 extractor 는 거부 시 text/plain 을 돌려준다.
//! 모든 응답을 JSON 봉투로 유지하기 위해 rejection 을 `ApiError` 로 바꾼 래퍼.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body (`axum::Json`)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string (`axum::extract::Query`)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// Path parameter (`axum::extract::Path`)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// Raw body (`Bytes`), 크기 제한 초과는 413 봉투
#[derive(Debug)]
pub struct RawBody(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for RawBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Bytes::from_request(req, state).await.map(Self).map_err(ApiError::from)
    }
}

/// 빈 body 를 `T::default()` 로 받는 JSON extractor (PUT 용)
///
/// 본문이 있으면 `Content-Type` 과 무관하게 JSON 으로 파싱한다.
#[derive(Debug)]
pub struct JsonOrEmpty<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrEmpty<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(ApiError::from)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|err| ApiError::InvalidInput(format!("Failed to parse the request body as JSON: {}", err)))
    }
}
