//! Customer Endpoints

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::{
    extract::{JsonBody, JsonOrEmpty, PathParam, QueryParams},
    handler::{handle_api_request, RequestOptions},
    models::{CreateCustomerRequest, Customer, UpdateCustomerRequest},
    services::{documents, erp::{ListArgs, SortOrder}},
    types::page_size,
    AppState,
};

/// 목록 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub customer_group: Option<String>,
    pub territory: Option<String>,
    /// customer_name 부분 일치
    pub search: Option<String>,
}

impl CustomerListQuery {
    pub fn to_args(&self) -> ListArgs {
        ListArgs::new()
            .filter_opt("customer_group", "=", self.customer_group.clone())
            .filter_opt("territory", "=", self.territory.clone())
            .filter_opt("customer_name", "like", self.search.as_ref().map(|term| format!("%{}%", term)))
            .order_by("modified", SortOrder::Desc)
            .limit(page_size(self.limit))
            .start(self.offset.unwrap_or(0))
    }
}

/// GET /api/customers
pub async fn list_customers(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CustomerListQuery>,
) -> Response {
    handle_api_request(&state, "customers.list", RequestOptions::PUBLIC, |erp| async move {
        documents::list::<Customer>(&erp, query.to_args()).await
    })
    .await
}

/// GET /api/customers/:id
pub async fn get_customer(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "customers.get", RequestOptions::PUBLIC, |erp| async move {
        documents::get::<Customer>(&erp, &id).await
    })
    .await
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateCustomerRequest>,
) -> Response {
    handle_api_request(&state, "customers.create", RequestOptions::AUTHENTICATED, |erp| async move {
        let doc = request.to_doc()?;
        documents::create::<Customer>(&erp, &doc).await
    })
    .await
}

/// PUT /api/customers/:id
pub async fn update_customer(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonOrEmpty(request): JsonOrEmpty<UpdateCustomerRequest>,
) -> Response {
    handle_api_request(&state, "customers.update", RequestOptions::AUTHENTICATED, |erp| async move {
        let patch = request.to_patch()?;
        documents::update::<Customer>(&erp, &id, patch).await
    })
    .await
}

/// DELETE /api/customers/:id
pub async fn delete_customer(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "customers.delete", RequestOptions::AUTHENTICATED, |erp| async move {
        documents::delete::<Customer>(&erp, &id).await
    })
    .await
}
