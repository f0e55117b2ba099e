//! Asset (고정자산)

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{
    child_rows, f64_field, i64_field, insert_opt, patch_from, require, str_field, ErpDoc, Patch,
};
use crate::error::ApiError;

/// 감가상각 장부 (child table `finance_books`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetFinanceBook {
    #[serde(default)]
    pub finance_book: String,
    #[serde(default)]
    pub depreciation_method: String,
    #[serde(default)]
    pub total_number_of_depreciations: i64,
    #[serde(default)]
    pub frequency_of_depreciation: i64,
    #[serde(default)]
    pub depreciation_start_date: String,
    #[serde(default)]
    pub expected_value_after_useful_life: f64,
}

impl AssetFinanceBook {
    pub fn from_row(row: &Value) -> Self {
        Self {
            finance_book: str_field(row, "finance_book"),
            depreciation_method: str_field(row, "depreciation_method"),
            total_number_of_depreciations: i64_field(row, "total_number_of_depreciations"),
            frequency_of_depreciation: i64_field(row, "frequency_of_depreciation"),
            depreciation_start_date: str_field(row, "depreciation_start_date"),
            expected_value_after_useful_life: f64_field(row, "expected_value_after_useful_life"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Asset {
    pub id: String,
    pub asset_name: String,
    pub item_code: String,
    pub asset_category: String,
    pub company: String,
    pub location: String,
    pub purchase_date: String,
    pub available_for_use_date: String,
    pub gross_purchase_amount: f64,
    pub status: String,
    pub docstatus: i64,
    pub finance_books: Vec<AssetFinanceBook>,
    pub modified: String,
}

impl ErpDoc for Asset {
    const DOCTYPE: &'static str = "Asset";
    const LIST_FIELDS: &'static [&'static str] = &["name"];

    fn from_doc(doc: &Value) -> Self {
        Self {
            id: str_field(doc, "name"),
            asset_name: str_field(doc, "asset_name"),
            item_code: str_field(doc, "item_code"),
            asset_category: str_field(doc, "asset_category"),
            company: str_field(doc, "company"),
            location: str_field(doc, "location"),
            purchase_date: str_field(doc, "purchase_date"),
            available_for_use_date: str_field(doc, "available_for_use_date"),
            gross_purchase_amount: f64_field(doc, "gross_purchase_amount"),
            status: str_field(doc, "status"),
            docstatus: i64_field(doc, "docstatus"),
            finance_books: child_rows(doc, "finance_books")
                .iter()
                .map(AssetFinanceBook::from_row)
                .collect(),
            modified: str_field(doc, "modified"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateAssetRequest {
    pub asset_name: Option<String>,
    pub item_code: Option<String>,
    pub asset_category: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<String>,
    pub available_for_use_date: Option<String>,
    pub gross_purchase_amount: Option<f64>,
    #[serde(default)]
    pub finance_books: Vec<AssetFinanceBook>,
}

impl CreateAssetRequest {
    pub fn to_doc(&self) -> Result<Value, ApiError> {
        let asset_name = require(&self.asset_name, "asset_name")?;
        let item_code = require(&self.item_code, "item_code")?;

        let mut doc = Patch::new();
        doc.insert("doctype".to_string(), json!(Asset::DOCTYPE));
        doc.insert("asset_name".to_string(), json!(asset_name));
        doc.insert("item_code".to_string(), json!(item_code));
        insert_opt(&mut doc, "asset_category", self.asset_category.clone());
        insert_opt(&mut doc, "company", self.company.clone());
        insert_opt(&mut doc, "location", self.location.clone());
        insert_opt(&mut doc, "purchase_date", self.purchase_date.clone());
        insert_opt(&mut doc, "available_for_use_date", self.available_for_use_date.clone());
        insert_opt(&mut doc, "gross_purchase_amount", self.gross_purchase_amount);
        if !self.finance_books.is_empty() {
            doc.insert("finance_books".to_string(), json!(self.finance_books));
        }

        Ok(Value::Object(doc))
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateAssetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_for_use_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_purchase_amount: Option<f64>,
    /// 보내면 child table 전체 교체
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_books: Option<Vec<AssetFinanceBook>>,
}

impl UpdateAssetRequest {
    pub fn to_patch(&self) -> Result<Patch, ApiError> {
        if matches!(&self.asset_name, Some(name) if name.trim().is_empty()) {
            return Err(ApiError::required("asset_name"));
        }
        patch_from(self)
    }
}
