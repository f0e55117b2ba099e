//! Item (상품/재고 품목)

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{bool_field, f64_field, insert_opt, patch_from, require, str_field, ErpDoc, Patch};
use crate::error::ApiError;

pub const DEFAULT_ITEM_GROUP: &str = "All Item Groups";
pub const DEFAULT_STOCK_UOM: &str = "Nos";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub item_code: String,
    pub item_name: String,
    pub item_group: String,
    pub stock_uom: String,
    pub description: String,
    pub standard_rate: f64,
    pub is_stock_item: bool,
    pub disabled: bool,
    pub modified: String,
}

impl ErpDoc for Item {
    const DOCTYPE: &'static str = "Item";
    const LIST_FIELDS: &'static [&'static str] = &[
        "name",
        "item_code",
        "item_name",
        "item_group",
        "stock_uom",
        "description",
        "standard_rate",
        "is_stock_item",
        "disabled",
        "modified",
    ];

    fn from_doc(doc: &Value) -> Self {
        Self {
            id: str_field(doc, "name"),
            item_code: str_field(doc, "item_code"),
            item_name: str_field(doc, "item_name"),
            item_group: str_field(doc, "item_group"),
            stock_uom: str_field(doc, "stock_uom"),
            description: str_field(doc, "description"),
            standard_rate: f64_field(doc, "standard_rate"),
            is_stock_item: bool_field(doc, "is_stock_item"),
            disabled: bool_field(doc, "disabled"),
            modified: str_field(doc, "modified"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateItemRequest {
    pub item_code: Option<String>,
    pub item_name: Option<String>,
    pub item_group: Option<String>,
    pub stock_uom: Option<String>,
    pub description: Option<String>,
    pub standard_rate: Option<f64>,
    /// 기본값: true
    pub is_stock_item: Option<bool>,
}

impl CreateItemRequest {
    pub fn to_doc(&self) -> Result<Value, ApiError> {
        let item_code = require(&self.item_code, "item_code")?;
        let item_name = require(&self.item_name, "item_name")?;

        let mut doc = Patch::new();
        doc.insert("doctype".to_string(), json!(Item::DOCTYPE));
        doc.insert("item_code".to_string(), json!(item_code));
        doc.insert("item_name".to_string(), json!(item_name));
        doc.insert(
            "item_group".to_string(),
            json!(self.item_group.as_deref().unwrap_or(DEFAULT_ITEM_GROUP)),
        );
        doc.insert(
            "stock_uom".to_string(),
            json!(self.stock_uom.as_deref().unwrap_or(DEFAULT_STOCK_UOM)),
        );
        doc.insert(
            "is_stock_item".to_string(),
            json!(self.is_stock_item.unwrap_or(true)),
        );
        insert_opt(&mut doc, "description", self.description.clone());
        insert_opt(&mut doc, "standard_rate", self.standard_rate);

        Ok(Value::Object(doc))
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stock_item: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl UpdateItemRequest {
    pub fn to_patch(&self) -> Result<Patch, ApiError> {
        if matches!(&self.item_name, Some(name) if name.trim().is_empty()) {
            return Err(ApiError::required("item_name"));
        }
        patch_from(self)
    }
}
