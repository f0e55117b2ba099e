//! Configuration Module
//!
//! # Interview Q&A
//!
//! Q: ERP 접속 정보가 없으면 서버가 시작되지 않아야 하는가?
//! A: 아니오. 서버는 시작하고, 요청 단위로 실패시킨다
//!    - `/api/config/status` 진단 엔드포인트는 설정 없이도 동작해야 함
//!    - ERP를 사용하는 모든 요청은 설정 에러(500)로 즉시 실패
//!    - 값 자체는 절대 노출하지 않고 set/unset 여부만 보고
//!
//! Q: 설정 검증은 어떻게 테스트하는가?
//! A: `from_env()`는 `from_lookup()`의 얇은 래퍼
//!    - 테스트에서는 HashMap 기반 lookup 주입 → 프로세스 환경변수 오염 없음

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

/// ERP 접속에 반드시 필요한 환경변수
pub const ERP_BASE_URL: &str = "ERP_BASE_URL";
pub const ERP_API_KEY: &str = "ERP_API_KEY";
pub const ERP_API_SECRET: &str = "ERP_API_SECRET";

pub const REQUIRED_ERP_VARS: [&str; 3] = [ERP_BASE_URL, ERP_API_KEY, ERP_API_SECRET];

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트 (기본값: 3001)
    pub port: u16,

    /// ERP 접속 설정 (누락 허용, 요청 시점에 검증)
    pub erp: ErpSettings,

    /// 프로덕션 CORS 허용 도메인 (ALLOWED_ORIGINS, 콤마 구분)
    pub allowed_origins: Vec<String>,

    /// 환경 (development, staging, production)
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// ERP 접속 설정
#[derive(Clone)]
pub struct ErpSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// 업스트림 호출 1건당 타임아웃
    pub timeout: Duration,
}

impl Default for ErpSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_secret: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

// api_key / api_secret 이 로그에 찍히지 않도록 Debug 직접 구현
impl std::fmt::Debug for ErpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErpSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<set>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// 진단 엔드포인트용 변수 상태 (값은 포함하지 않음)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConfigVarStatus {
    pub name: &'static str,
    pub set: bool,
}

impl ErpSettings {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// 누락된 필수 변수 이름 목록
    pub fn missing(&self) -> Vec<&'static str> {
        self.status()
            .into_iter()
            .filter(|var| !var.set)
            .map(|var| var.name)
            .collect()
    }

    pub fn is_configured(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn status(&self) -> Vec<ConfigVarStatus> {
        vec![
            ConfigVarStatus { name: ERP_BASE_URL, set: self.base_url.is_some() },
            ConfigVarStatus { name: ERP_API_KEY, set: self.api_key.is_some() },
            ConfigVarStatus { name: ERP_API_SECRET, set: self.api_secret.is_some() },
        ]
    }
}

impl Config {
    /// 환경변수에서 설정 로드
    ///
    /// # Required Environment Variables (요청 처리 시점에 검증)
    ///
    /// - `ERP_BASE_URL`: ERP 서버 URL (예: https://erp.example.com)
    /// - `ERP_API_KEY`: API key
    /// - `ERP_API_SECRET`: API secret
    ///
    /// # Optional Environment Variables
    ///
    /// - `PORT`: 서버 포트 (기본값: 3001)
    /// - `ERP_TIMEOUT_SECS`: 업스트림 타임아웃 (기본값: 30)
    /// - `ALLOWED_ORIGINS`: 프로덕션 CORS 도메인
    /// - `ENVIRONMENT`: development | staging | production
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 lookup 함수로 설정 생성
    ///
    /// 빈 문자열은 미설정으로 취급
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let environment = match get("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        let timeout_secs = match get("ERP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("ERP_TIMEOUT_SECS must be a whole number of seconds")?,
            None => ErpSettings::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "3001".to_string())
                .parse()
                .context("PORT must be a valid number")?,

            erp: ErpSettings {
                base_url: get(ERP_BASE_URL),
                api_key: get(ERP_API_KEY),
                api_secret: get(ERP_API_SECRET),
                timeout: Duration::from_secs(timeout_secs),
            },

            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|origin| origin.trim().to_string())
                        .filter(|origin| !origin.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            environment,
        })
    }

    /// 프로덕션 환경인지 확인
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
