//! Configuration diagnostics
//!
//! 변수 이름과 설정 여부만 반환한다. 값은 절대 응답에 포함하지 않음.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{config::ConfigVarStatus, types::ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct ConfigStatusResponse {
    pub configured: bool,
    pub environment: String,
    pub variables: Vec<ConfigVarStatus>,
}

/// GET /api/config/status
pub async fn config_status(State(state): State<AppState>) -> Json<ApiResponse<ConfigStatusResponse>> {
    let erp = &state.config.erp;
    Json(ApiResponse::success(ConfigStatusResponse {
        configured: erp.is_configured(),
        environment: state.config.environment.as_str().to_string(),
        variables: erp.status(),
    }))
}
