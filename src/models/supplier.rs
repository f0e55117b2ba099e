//! Supplier

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{bool_field, insert_opt, patch_from, require, str_field, ErpDoc, Patch};
use crate::error::ApiError;

pub const DEFAULT_SUPPLIER_TYPE: &str = "Company";
pub const DEFAULT_SUPPLIER_GROUP: &str = "All Supplier Groups";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Supplier {
    pub id: String,
    pub supplier_name: String,
    pub supplier_type: String,
    pub supplier_group: String,
    pub country: String,
    pub email_id: String,
    pub mobile_no: String,
    pub tax_id: String,
    pub disabled: bool,
    pub modified: String,
}

impl ErpDoc for Supplier {
    const DOCTYPE: &'static str = "Supplier";
    const LIST_FIELDS: &'static [&'static str] = &[
        "name",
        "supplier_name",
        "supplier_type",
        "supplier_group",
        "country",
        "email_id",
        "mobile_no",
        "tax_id",
        "disabled",
        "modified",
    ];

    fn from_doc(doc: &Value) -> Self {
        Self {
            id: str_field(doc, "name"),
            supplier_name: str_field(doc, "supplier_name"),
            supplier_type: str_field(doc, "supplier_type"),
            supplier_group: str_field(doc, "supplier_group"),
            country: str_field(doc, "country"),
            email_id: str_field(doc, "email_id"),
            mobile_no: str_field(doc, "mobile_no"),
            tax_id: str_field(doc, "tax_id"),
            disabled: bool_field(doc, "disabled"),
            modified: str_field(doc, "modified"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSupplierRequest {
    pub supplier_name: Option<String>,
    pub supplier_type: Option<String>,
    pub supplier_group: Option<String>,
    pub country: Option<String>,
    pub email_id: Option<String>,
    pub mobile_no: Option<String>,
    pub tax_id: Option<String>,
}

impl CreateSupplierRequest {
    pub fn to_doc(&self) -> Result<Value, ApiError> {
        let supplier_name = require(&self.supplier_name, "supplier_name")?;

        let mut doc = Patch::new();
        doc.insert("doctype".to_string(), json!(Supplier::DOCTYPE));
        doc.insert("supplier_name".to_string(), json!(supplier_name));
        doc.insert(
            "supplier_type".to_string(),
            json!(self.supplier_type.as_deref().unwrap_or(DEFAULT_SUPPLIER_TYPE)),
        );
        doc.insert(
            "supplier_group".to_string(),
            json!(self.supplier_group.as_deref().unwrap_or(DEFAULT_SUPPLIER_GROUP)),
        );
        insert_opt(&mut doc, "country", self.country.clone());
        insert_opt(&mut doc, "email_id", self.email_id.clone());
        insert_opt(&mut doc, "mobile_no", self.mobile_no.clone());
        insert_opt(&mut doc, "tax_id", self.tax_id.clone());

        Ok(Value::Object(doc))
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateSupplierRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl UpdateSupplierRequest {
    pub fn to_patch(&self) -> Result<Patch, ApiError> {
        if matches!(&self.supplier_name, Some(name) if name.trim().is_empty()) {
            return Err(ApiError::required("supplier_name"));
        }
        patch_from(self)
    }
}
