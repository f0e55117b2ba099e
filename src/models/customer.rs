//! Customer

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{bool_field, insert_opt, patch_from, require, str_field, ErpDoc, Patch};
use crate::error::ApiError;

pub const DEFAULT_CUSTOMER_TYPE: &str = "Company";
pub const DEFAULT_CUSTOMER_GROUP: &str = "All Customer Groups";
pub const DEFAULT_TERRITORY: &str = "All Territories";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Customer {
    pub id: String,
    pub customer_name: String,
    pub customer_type: String,
    pub customer_group: String,
    pub territory: String,
    pub email_id: String,
    pub mobile_no: String,
    pub tax_id: String,
    pub disabled: bool,
    pub modified: String,
}

impl ErpDoc for Customer {
    const DOCTYPE: &'static str = "Customer";
    const LIST_FIELDS: &'static [&'static str] = &[
        "name",
        "customer_name",
        "customer_type",
        "customer_group",
        "territory",
        "email_id",
        "mobile_no",
        "tax_id",
        "disabled",
        "modified",
    ];

    fn from_doc(doc: &Value) -> Self {
        Self {
            id: str_field(doc, "name"),
            customer_name: str_field(doc, "customer_name"),
            customer_type: str_field(doc, "customer_type"),
            customer_group: str_field(doc, "customer_group"),
            territory: str_field(doc, "territory"),
            email_id: str_field(doc, "email_id"),
            mobile_no: str_field(doc, "mobile_no"),
            tax_id: str_field(doc, "tax_id"),
            disabled: bool_field(doc, "disabled"),
            modified: str_field(doc, "modified"),
        }
    }
}

/// 고객 생성 요청
#[derive(Debug, Default, Deserialize)]
pub struct CreateCustomerRequest {
    pub customer_name: Option<String>,
    /// Company | Individual (기본값: Company)
    pub customer_type: Option<String>,
    pub customer_group: Option<String>,
    pub territory: Option<String>,
    pub email_id: Option<String>,
    pub mobile_no: Option<String>,
    pub tax_id: Option<String>,
}

impl CreateCustomerRequest {
    pub fn to_doc(&self) -> Result<Value, ApiError> {
        let customer_name = require(&self.customer_name, "customer_name")?;

        let mut doc = Patch::new();
        doc.insert("doctype".to_string(), json!(Customer::DOCTYPE));
        doc.insert("customer_name".to_string(), json!(customer_name));
        doc.insert(
            "customer_type".to_string(),
            json!(self.customer_type.as_deref().unwrap_or(DEFAULT_CUSTOMER_TYPE)),
        );
        doc.insert(
            "customer_group".to_string(),
            json!(self.customer_group.as_deref().unwrap_or(DEFAULT_CUSTOMER_GROUP)),
        );
        doc.insert(
            "territory".to_string(),
            json!(self.territory.as_deref().unwrap_or(DEFAULT_TERRITORY)),
        );
        insert_opt(&mut doc, "email_id", self.email_id.clone());
        insert_opt(&mut doc, "mobile_no", self.mobile_no.clone());
        insert_opt(&mut doc, "tax_id", self.tax_id.clone());

        Ok(Value::Object(doc))
    }
}

/// 고객 수정 요청 (보낸 필드만 반영)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl UpdateCustomerRequest {
    pub fn to_patch(&self) -> Result<Patch, ApiError> {
        if matches!(&self.customer_name, Some(name) if name.trim().is_empty()) {
            return Err(ApiError::required("customer_name"));
        }
        patch_from(self)
    }
}
