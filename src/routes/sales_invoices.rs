//! Sales Invoice Endpoints
//!
//! 목록은 hydrate (child table `items` 포함), 일부 문서 조회 실패 시 `failed` 에 기록.
//!
//! # Document lifecycle
//!
//! ```text
//! Draft (0) ──submit──▶ Submitted (1) ──cancel──▶ Cancelled (2)
//! ```

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::{
    extract::{JsonBody, JsonOrEmpty, PathParam, QueryParams},
    handler::{handle_api_request, RequestOptions},
    models::{CreateSalesInvoiceRequest, ErpDoc, SalesInvoice, UpdateSalesInvoiceRequest},
    services::{documents, erp::{ListArgs, SortOrder}},
    types::page_size,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct SalesInvoiceListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub customer: Option<String>,
    pub status: Option<String>,
    pub docstatus: Option<i64>,
    /// posting_date >= from_date
    pub from_date: Option<String>,
    /// posting_date <= to_date
    pub to_date: Option<String>,
}

impl SalesInvoiceListQuery {
    pub fn to_args(&self) -> ListArgs {
        ListArgs::new()
            .filter_opt("customer", "=", self.customer.clone())
            .filter_opt("status", "=", self.status.clone())
            .filter_opt("docstatus", "=", self.docstatus)
            .filter_opt("posting_date", ">=", self.from_date.clone())
            .filter_opt("posting_date", "<=", self.to_date.clone())
            .order_by("posting_date", SortOrder::Desc)
            .limit(page_size(self.limit))
            .start(self.offset.unwrap_or(0))
    }
}

/// GET /api/sales-invoices
pub async fn list_sales_invoices(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SalesInvoiceListQuery>,
) -> Response {
    handle_api_request(&state, "sales_invoices.list", RequestOptions::PUBLIC, |erp| async move {
        documents::list_hydrated::<SalesInvoice>(&erp, query.to_args()).await
    })
    .await
}

/// GET /api/sales-invoices/:id
pub async fn get_sales_invoice(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "sales_invoices.get", RequestOptions::PUBLIC, |erp| async move {
        documents::get::<SalesInvoice>(&erp, &id).await
    })
    .await
}

/// POST /api/sales-invoices
///
/// # Request
///
/// ```json
/// {
///   "customer": "C-0001",
///   "items": [{"item_code": "ITM-1", "qty": 2, "rate": 50}]
/// }
/// ```
///
/// 라인 amount 와 total / grand_total 은 서버에서 계산해 함께 저장한다.
pub async fn create_sales_invoice(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateSalesInvoiceRequest>,
) -> Response {
    handle_api_request(&state, "sales_invoices.create", RequestOptions::AUTHENTICATED, |erp| async move {
        let doc = request.to_doc()?;
        documents::create::<SalesInvoice>(&erp, &doc).await
    })
    .await
}

/// PUT /api/sales-invoices/:id
pub async fn update_sales_invoice(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonOrEmpty(request): JsonOrEmpty<UpdateSalesInvoiceRequest>,
) -> Response {
    handle_api_request(&state, "sales_invoices.update", RequestOptions::AUTHENTICATED, |erp| async move {
        let patch = request.to_patch()?;
        documents::update::<SalesInvoice>(&erp, &id, patch).await
    })
    .await
}

/// DELETE /api/sales-invoices/:id (Draft 만 가능, 나머지는 ERP 가 거부)
pub async fn delete_sales_invoice(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Response {
    handle_api_request(&state, "sales_invoices.delete", RequestOptions::AUTHENTICATED, |erp| async move {
        documents::delete::<SalesInvoice>(&erp, &id).await
    })
    .await
}

/// POST /api/sales-invoices/:id/submit
pub async fn submit_sales_invoice(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Response {
    handle_api_request(&state, "sales_invoices.submit", RequestOptions::AUTHENTICATED, |erp| async move {
        let current = erp.db().get_doc(SalesInvoice::DOCTYPE, &id).await?;
        let submitted = erp.db().submit(&current).await?;

        // submit 응답에 문서가 없으면 다시 조회
        let doc = if submitted.is_object() {
            submitted
        } else {
            erp.db().get_doc(SalesInvoice::DOCTYPE, &id).await?
        };
        Ok(SalesInvoice::from_doc(&doc))
    })
    .await
}

/// POST /api/sales-invoices/:id/cancel
pub async fn cancel_sales_invoice(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> Response {
    handle_api_request(&state, "sales_invoices.cancel", RequestOptions::AUTHENTICATED, |erp| async move {
        erp.db().cancel(SalesInvoice::DOCTYPE, &id).await?;
        documents::get::<SalesInvoice>(&erp, &id).await
    })
    .await
}
