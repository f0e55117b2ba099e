//! Health Check Endpoint
//!
//! # Interview Q&A
//!
//! Q: ERP 에 ping 까지 하는 이유는?
//! A: "깊은 헬스체크"(deep health check) 패턴
//!    - 단순 200 OK: 프로세스 살아있음
//!    - ERP ping: 실제 서비스 가능 상태
//!    - 설정 누락/업스트림 장애는 `degraded` 로 표시 (HTTP 는 항상 200)

use std::time::Instant;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{types::ApiResponse, AppState};

/// Health check 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub erp: ErpStatus,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErpStatus {
    pub configured: bool,
    pub reachable: bool,
    pub latency_ms: Option<u64>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let erp = match &state.erp {
        Some(erp) => {
            let started = Instant::now();
            match erp.call().get("frappe.ping", &[]).await {
                Ok(_) => ErpStatus {
                    configured: true,
                    reachable: true,
                    latency_ms: Some(started.elapsed().as_millis() as u64),
                },
                Err(err) => {
                    tracing::warn!(error = %err, "ERP ping failed");
                    ErpStatus {
                        configured: true,
                        reachable: false,
                        latency_ms: None,
                    }
                }
            }
        }
        None => ErpStatus {
            configured: false,
            reachable: false,
            latency_ms: None,
        },
    };

    Json(ApiResponse::success(HealthResponse {
        status: if erp.reachable { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        erp,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
