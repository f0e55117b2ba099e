//! Sales Invoice
//!
//! 목록 API 는 child table(`items`)을 주지 않으므로 hydrate 로 채운다.
//!
//! # Amount 계산
//!
//! ```text
//! line.amount  = upstream amount ?? qty × rate
//! total        = upstream total ?? Σ line.amount
//! grand_total  = upstream grand_total ?? total
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{child_rows, f64_field, i64_field, insert_opt, opt_f64, require, str_field, ErpDoc, Patch};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceLine {
    pub item_code: String,
    pub item_name: String,
    pub description: String,
    pub qty: f64,
    pub rate: f64,
    pub amount: f64,
    pub uom: String,
}

impl InvoiceLine {
    pub fn from_row(row: &Value) -> Self {
        let qty = f64_field(row, "qty");
        let rate = f64_field(row, "rate");
        Self {
            item_code: str_field(row, "item_code"),
            item_name: str_field(row, "item_name"),
            description: str_field(row, "description"),
            qty,
            rate,
            amount: opt_f64(row, "amount").unwrap_or(qty * rate),
            uom: str_field(row, "uom"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesInvoice {
    pub id: String,
    pub customer: String,
    pub customer_name: String,
    pub company: String,
    pub posting_date: String,
    pub due_date: String,
    pub currency: String,
    pub status: String,
    /// 0 = Draft, 1 = Submitted, 2 = Cancelled
    pub docstatus: i64,
    pub items: Vec<InvoiceLine>,
    pub total: f64,
    pub grand_total: f64,
    pub outstanding_amount: f64,
    pub modified: String,
}

impl ErpDoc for SalesInvoice {
    const DOCTYPE: &'static str = "Sales Invoice";
    const LIST_FIELDS: &'static [&'static str] = &["name"];

    fn from_doc(doc: &Value) -> Self {
        let items: Vec<InvoiceLine> = child_rows(doc, "items")
            .iter()
            .map(InvoiceLine::from_row)
            .collect();
        let total = opt_f64(doc, "total").unwrap_or_else(|| sum_amounts(&items));

        Self {
            id: str_field(doc, "name"),
            customer: str_field(doc, "customer"),
            customer_name: str_field(doc, "customer_name"),
            company: str_field(doc, "company"),
            posting_date: str_field(doc, "posting_date"),
            due_date: str_field(doc, "due_date"),
            currency: str_field(doc, "currency"),
            status: str_field(doc, "status"),
            docstatus: i64_field(doc, "docstatus"),
            grand_total: opt_f64(doc, "grand_total").unwrap_or(total),
            outstanding_amount: f64_field(doc, "outstanding_amount"),
            modified: str_field(doc, "modified"),
            items,
            total,
        }
    }
}

fn sum_amounts(lines: &[InvoiceLine]) -> f64 {
    lines.iter().map(|line| line.amount).sum()
}

/// 요청 라인 (qty 기본 1, rate 기본 0)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceLineInput {
    pub item_code: Option<String>,
    pub qty: Option<f64>,
    pub rate: Option<f64>,
    pub description: Option<String>,
    pub uom: Option<String>,
}

/// 요청 라인 → child table 행 + 합계
fn build_lines(lines: &[InvoiceLineInput]) -> Result<(Vec<Value>, f64), ApiError> {
    if lines.is_empty() {
        return Err(ApiError::required("items"));
    }

    let mut rows = Vec::with_capacity(lines.len());
    let mut total = 0.0;

    for (index, line) in lines.iter().enumerate() {
        let item_code = require(&line.item_code, &format!("items[{}].item_code", index))?;
        let qty = line.qty.unwrap_or(1.0);
        let rate = line.rate.unwrap_or(0.0);
        let amount = qty * rate;
        total += amount;

        let mut row = Patch::new();
        row.insert("item_code".to_string(), json!(item_code));
        row.insert("qty".to_string(), json!(qty));
        row.insert("rate".to_string(), json!(rate));
        row.insert("amount".to_string(), json!(amount));
        insert_opt(&mut row, "description", line.description.clone());
        insert_opt(&mut row, "uom", line.uom.clone());
        rows.push(Value::Object(row));
    }

    Ok((rows, total))
}

fn insert_lines(doc: &mut Patch, lines: &[InvoiceLineInput]) -> Result<(), ApiError> {
    let (rows, total) = build_lines(lines)?;
    doc.insert("items".to_string(), Value::Array(rows));
    doc.insert("total".to_string(), json!(total));
    doc.insert("grand_total".to_string(), json!(total));
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSalesInvoiceRequest {
    pub customer: Option<String>,
    pub company: Option<String>,
    pub posting_date: Option<String>,
    pub due_date: Option<String>,
    pub currency: Option<String>,
    #[serde(default)]
    pub items: Vec<InvoiceLineInput>,
}

impl CreateSalesInvoiceRequest {
    pub fn to_doc(&self) -> Result<Value, ApiError> {
        let customer = require(&self.customer, "customer")?;

        let mut doc = Patch::new();
        doc.insert("doctype".to_string(), json!(SalesInvoice::DOCTYPE));
        doc.insert("customer".to_string(), json!(customer));
        insert_opt(&mut doc, "company", self.company.clone());
        insert_opt(&mut doc, "posting_date", self.posting_date.clone());
        insert_opt(&mut doc, "due_date", self.due_date.clone());
        insert_opt(&mut doc, "currency", self.currency.clone());
        insert_lines(&mut doc, &self.items)?;

        Ok(Value::Object(doc))
    }
}

/// 인보이스 수정 요청
///
/// `items` 를 보내면 child table 전체를 교체하고 합계를 다시 계산한다.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSalesInvoiceRequest {
    pub customer: Option<String>,
    pub company: Option<String>,
    pub posting_date: Option<String>,
    pub due_date: Option<String>,
    pub currency: Option<String>,
    pub items: Option<Vec<InvoiceLineInput>>,
}

impl UpdateSalesInvoiceRequest {
    pub fn to_patch(&self) -> Result<Patch, ApiError> {
        if matches!(&self.customer, Some(customer) if customer.trim().is_empty()) {
            return Err(ApiError::required("customer"));
        }

        let mut patch = Patch::new();
        insert_opt(&mut patch, "customer", self.customer.clone());
        insert_opt(&mut patch, "company", self.company.clone());
        insert_opt(&mut patch, "posting_date", self.posting_date.clone());
        insert_opt(&mut patch, "due_date", self.due_date.clone());
        insert_opt(&mut patch, "currency", self.currency.clone());
        if let Some(items) = &self.items {
            insert_lines(&mut patch, items)?;
        }

        Ok(patch)
    }
}
