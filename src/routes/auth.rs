//! Auth Endpoint

use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::{
    handler::{authenticate, handle_api_request, RequestOptions},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: String,
}

/// GET /api/auth/me
///
/// API key 에 연결된 ERP 사용자. Guest 면 401.
pub async fn current_user(State(state): State<AppState>) -> Response {
    handle_api_request(&state, "auth.me", RequestOptions::PUBLIC, |erp| async move {
        let user = authenticate(&erp).await?;
        Ok(CurrentUserResponse { user })
    })
    .await
}
