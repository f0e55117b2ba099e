//! 세션/사용자 조회

use serde_json::Value;

use super::{ErpClient, ErpError};

/// 로그인하지 않은 세션의 사용자 이름
pub const GUEST_USER: &str = "Guest";

pub struct AuthClient<'a> {
    erp: &'a ErpClient,
}

impl<'a> AuthClient<'a> {
    pub(super) fn new(erp: &'a ErpClient) -> Self {
        Self { erp }
    }

    /// frappe.auth.get_logged_user
    ///
    /// API key 인증에서는 key 소유자, 세션이 없으면 "Guest"
    pub async fn get_logged_in_user(&self) -> Result<String, ErpError> {
        match self.erp.call().get("frappe.auth.get_logged_user", &[]).await? {
            Value::String(user) => Ok(user),
            other => Err(ErpError::Decode(format!("expected a user name, got {}", other))),
        }
    }
}
