//! ERP 문서 ↔ DTO 매핑
//!
//! 라우트마다 반복되던 문서→DTO 변환을 리소스별 순수 함수로 분리.
//! 단건 조회, 목록, hydrate 가 모두 같은 `from_doc` 을 사용한다.
//!
//! 누락된 선택 필드는 기본값으로 채운다:
//! 문자열 → "", 숫자 → 0, 체크박스 → false, child table → []

mod asset;
mod customer;
mod file;
mod item;
mod sales_invoice;
mod supplier;

pub use asset::{Asset, AssetFinanceBook, CreateAssetRequest, UpdateAssetRequest};
pub use customer::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
pub use file::UploadedFile;
pub use item::{CreateItemRequest, Item, UpdateItemRequest};
pub use sales_invoice::{
    CreateSalesInvoiceRequest, InvoiceLine, InvoiceLineInput, SalesInvoice, UpdateSalesInvoiceRequest,
};
pub use supplier::{CreateSupplierRequest, Supplier, UpdateSupplierRequest};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// ERP doctype 하나에 대응하는 DTO
pub trait ErpDoc: Serialize + Sized {
    /// ERP doctype 이름 (예: "Sales Invoice")
    const DOCTYPE: &'static str;

    /// 목록 API 에서 바로 매핑할 필드
    const LIST_FIELDS: &'static [&'static str];

    fn from_doc(doc: &Value) -> Self;
}

/// 문서 patch (부분 수정 필드)
pub type Patch = Map<String, Value>;

// ============ Field accessors ============

/// 문자열 필드 (숫자는 문자열로, 없으면 "")
pub fn str_field(doc: &Value, key: &str) -> String {
    match doc.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// 숫자 필드 (숫자 문자열 허용, 없으면 None)
pub fn opt_f64(doc: &Value, key: &str) -> Option<f64> {
    match doc.get(key) {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn f64_field(doc: &Value, key: &str) -> f64 {
    opt_f64(doc, key).unwrap_or(0.0)
}

pub fn i64_field(doc: &Value, key: &str) -> i64 {
    match doc.get(key) {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value as i64))
            .unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Check 필드 (Frappe 는 0/1 정수)
pub fn bool_field(doc: &Value, key: &str) -> bool {
    match doc.get(key) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().map(|value| value != 0.0).unwrap_or(false),
        Some(Value::String(text)) => matches!(text.trim(), "1" | "true"),
        _ => false,
    }
}

/// child table 행 목록
pub fn child_rows<'a>(doc: &'a Value, key: &str) -> &'a [Value] {
    doc.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// ============ Input helpers ============

/// 필수 문자열 입력 (공백만 있으면 누락으로 취급)
pub fn require(value: &Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::required(field))
}

/// 값이 있을 때만 문서에 필드 추가
pub fn insert_opt<V: Into<Value>>(doc: &mut Patch, key: &str, value: Option<V>) {
    if let Some(value) = value {
        doc.insert(key.to_string(), value.into());
    }
}

/// `skip_serializing_if = "Option::is_none"` 인 update 요청 → patch
pub fn patch_from<T: Serialize>(update: &T) -> Result<Patch, ApiError> {
    match serde_json::to_value(update) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::Unknown(format!("update payload must be an object, got {}", other))),
        Err(err) => Err(ApiError::Unknown(err.to_string())),
    }
}

/// 현재 문서 위에 patch 를 덮어씀 (최상위 필드 단위, child table 은 통째로 교체)
pub fn merge_patch(current: Value, patch: Patch) -> Value {
    match current {
        Value::Object(mut doc) => {
            doc.extend(patch);
            Value::Object(doc)
        }
        _ => Value::Object(patch),
    }
}
