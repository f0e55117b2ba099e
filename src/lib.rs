//! ERP Gateway API Library
//!
//! # Overview
//!
//! Frappe/ERPNext REST API 앞단의 stateless 프록시/집계 레이어.
//! 각 라우트는 ERP 문서 API 를 호출하고, 문서를 애플리케이션 DTO 로 변환한 뒤
//! 공통 JSON 봉투(envelope)로 응답한다.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         API                              │
//! │                                                          │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐    │
//! │  │ Routes  │─▶│ Handler │─▶│Services │─▶│ Models  │    │
//! │  └─────────┘  └────┬────┘  └────┬────┘  └─────────┘    │
//! │                    │ envelope   │ ErpClient            │
//! └────────────────────┼────────────┼──────────────────────┘
//!                      ▼            ▼
//!               JSON response   ┌────────────────┐
//!                               │ ERP (upstream) │
//!                               └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 분류 및 응답 변환
//! - `handler`: 공통 요청 래퍼 (설정/인증 검사, 봉투, 로깅)
//! - `extract`: 봉투 형식으로 거부하는 extractor
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: ERP 클라이언트 어댑터, 문서 조회/저장 헬퍼
//! - `models`: ERP 문서 ↔ DTO 매핑
//! - `types`: 공통 응답 타입
//!
//! ## Usage
//!
//! ```rust,ignore
//! use erp_gateway_api::{AppState, Config, routes};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let state = AppState::new(Config::from_env()?)?;
//!     let app = routes::create_router(state);
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod models;
pub mod routes;
pub mod services;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ApiError;
pub use services::erp::{ErpClient, ErpError};

/// 애플리케이션 전역 상태
///
/// ERP 클라이언트는 프로세스 시작 시 한 번만 생성된다.
/// 설정이 누락되면 `None` 으로 두고, ERP 를 쓰는 모든 요청이 설정 에러로 실패한다.
#[derive(Clone)]
pub struct AppState {
    pub erp: Option<Arc<ErpClient>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// 설정으로 상태 구성
    ///
    /// 누락된 ERP 설정은 허용 (진단 엔드포인트용), 잘못된 URL 등은 즉시 실패
    pub fn new(config: Config) -> Result<Self, ErpError> {
        let erp = match ErpClient::new(&config.erp) {
            Ok(client) => Some(Arc::new(client)),
            Err(ErpError::MissingConfiguration { missing }) => {
                tracing::warn!(?missing, "ERP configuration incomplete; ERP-backed routes will fail");
                None
            }
            Err(err) => return Err(err),
        };

        Ok(Self {
            erp,
            config: Arc::new(config),
        })
    }

    /// 설정된 ERP 클라이언트 핸들
    pub fn erp(&self) -> Result<Arc<ErpClient>, ApiError> {
        self.erp
            .clone()
            .ok_or_else(|| ApiError::ConfigurationMissing(self.config.erp.missing()))
    }
}
