//! 서버 메서드 직접 호출 (`/api/method/{method}`)
//!
//! 타입 API 로 커버되지 않는 whitelisted 메서드용.
//! frappe.client.get / get_list / insert / save / delete / get_value 등

use serde_json::Value;

use super::{take_message, ErpClient, ErpError};

pub struct CallClient<'a> {
    erp: &'a ErpClient,
}

impl<'a> CallClient<'a> {
    pub(super) fn new(erp: &'a ErpClient) -> Self {
        Self { erp }
    }

    /// GET /api/method/{method}?args → `message`
    pub async fn get(&self, method: &str, args: &[(&str, String)]) -> Result<Value, ErpError> {
        tracing::debug!(method, "erp call.get");
        let url = self.erp.endpoint(&["api", "method", method])?;
        let body = self.erp.send(self.erp.http().get(url).query(args)).await?;
        Ok(take_message(body))
    }

    /// POST /api/method/{method} (JSON body) → `message`
    pub async fn post(&self, method: &str, args: &Value) -> Result<Value, ErpError> {
        tracing::debug!(method, "erp call.post");
        let url = self.erp.endpoint(&["api", "method", method])?;
        let body = self.erp.send(self.erp.http().post(url).json(args)).await?;
        Ok(take_message(body))
    }
}
