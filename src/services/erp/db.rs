//! 문서 CRUD (`/api/resource`) + frappe.client.* 래퍼

use serde_json::{json, Value};

use super::{filters_to_json, take_data, ErpClient, ErpError, Filter, ListArgs};

pub struct DocClient<'a> {
    erp: &'a ErpClient,
}

impl<'a> DocClient<'a> {
    pub(super) fn new(erp: &'a ErpClient) -> Self {
        Self { erp }
    }

    /// GET /api/resource/{doctype}/{name}
    pub async fn get_doc(&self, doctype: &str, name: &str) -> Result<Value, ErpError> {
        tracing::debug!(doctype, name, "erp get_doc");
        let url = self.erp.endpoint(&["api", "resource", doctype, name])?;
        let body = self.erp.send(self.erp.http().get(url)).await?;
        take_data(body)
    }

    /// GET /api/resource/{doctype}?fields=..&filters=..
    ///
    /// 목록 API 는 child table(items 등)을 돌려주지 않음 → 필요하면 hydrate
    pub async fn get_doc_list(&self, doctype: &str, args: &ListArgs) -> Result<Vec<Value>, ErpError> {
        tracing::debug!(doctype, limit = ?args.limit, "erp get_doc_list");
        let url = self.erp.endpoint(&["api", "resource", doctype])?;
        let body = self
            .erp
            .send(self.erp.http().get(url).query(&args.to_query()))
            .await?;

        match take_data(body)? {
            Value::Array(rows) => Ok(rows),
            other => Err(ErpError::Decode(format!("expected a list, got {}", other))),
        }
    }

    /// frappe.client.get_count
    pub async fn get_count(&self, doctype: &str, filters: &[Filter]) -> Result<u64, ErpError> {
        let count = self
            .erp
            .call()
            .get(
                "frappe.client.get_count",
                &[("doctype", doctype.to_string()), ("filters", filters_to_json(filters))],
            )
            .await?;

        count
            .as_u64()
            .ok_or_else(|| ErpError::Decode(format!("expected a count, got {}", count)))
    }

    /// POST /api/resource/{doctype}
    pub async fn create_doc(&self, doctype: &str, doc: &Value) -> Result<Value, ErpError> {
        tracing::debug!(doctype, "erp create_doc");
        let url = self.erp.endpoint(&["api", "resource", doctype])?;
        let body = self.erp.send(self.erp.http().post(url).json(doc)).await?;
        take_data(body)
    }

    /// PUT /api/resource/{doctype}/{name}
    pub async fn update_doc(&self, doctype: &str, name: &str, doc: &Value) -> Result<Value, ErpError> {
        tracing::debug!(doctype, name, "erp update_doc");
        let url = self.erp.endpoint(&["api", "resource", doctype, name])?;
        let body = self.erp.send(self.erp.http().put(url).json(doc)).await?;
        take_data(body)
    }

    /// DELETE /api/resource/{doctype}/{name}
    pub async fn delete_doc(&self, doctype: &str, name: &str) -> Result<(), ErpError> {
        tracing::debug!(doctype, name, "erp delete_doc");
        let url = self.erp.endpoint(&["api", "resource", doctype, name])?;
        self.erp.send(self.erp.http().delete(url)).await?;
        Ok(())
    }

    /// frappe.client.submit (docstatus 0 → 1)
    pub async fn submit(&self, doc: &Value) -> Result<Value, ErpError> {
        self.erp
            .call()
            .post("frappe.client.submit", &json!({ "doc": doc }))
            .await
    }

    /// frappe.client.cancel (docstatus 1 → 2)
    pub async fn cancel(&self, doctype: &str, name: &str) -> Result<(), ErpError> {
        self.erp
            .call()
            .post("frappe.client.cancel", &json!({ "doctype": doctype, "name": name }))
            .await?;
        Ok(())
    }

    /// frappe.client.get_value
    pub async fn get_value(
        &self,
        doctype: &str,
        fieldname: &str,
        filters: &[Filter],
    ) -> Result<Value, ErpError> {
        let message = self
            .erp
            .call()
            .get(
                "frappe.client.get_value",
                &[
                    ("doctype", doctype.to_string()),
                    ("fieldname", fieldname.to_string()),
                    ("filters", filters_to_json(filters)),
                ],
            )
            .await?;

        // {"message": {"<fieldname>": value}}
        Ok(match message {
            Value::Object(mut map) => map.remove(fieldname).unwrap_or(Value::Null),
            other => other,
        })
    }
}
