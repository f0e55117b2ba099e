//! Supplier Endpoints

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::{
    extract::{JsonBody, JsonOrEmpty, PathParam, QueryParams},
    handler::{handle_api_request, RequestOptions},
    models::{CreateSupplierRequest, Supplier, UpdateSupplierRequest},
    services::{documents, erp::{ListArgs, SortOrder}},
    types::page_size,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct SupplierListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub supplier_group: Option<String>,
    pub country: Option<String>,
    pub search: Option<String>,
}

impl SupplierListQuery {
    pub fn to_args(&self) -> ListArgs {
        ListArgs::new()
            .filter_opt("supplier_group", "=", self.supplier_group.clone())
            .filter_opt("country", "=", self.country.clone())
            .filter_opt("supplier_name", "like", self.search.as_ref().map(|term| format!("%{}%", term)))
            .order_by("modified", SortOrder::Desc)
            .limit(page_size(self.limit))
            .start(self.offset.unwrap_or(0))
    }
}

/// GET /api/suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SupplierListQuery>,
) -> Response {
    handle_api_request(&state, "suppliers.list", RequestOptions::PUBLIC, |erp| async move {
        documents::list::<Supplier>(&erp, query.to_args()).await
    })
    .await
}

/// GET /api/suppliers/:id
pub async fn get_supplier(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "suppliers.get", RequestOptions::PUBLIC, |erp| async move {
        documents::get::<Supplier>(&erp, &id).await
    })
    .await
}

/// POST /api/suppliers
pub async fn create_supplier(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateSupplierRequest>,
) -> Response {
    handle_api_request(&state, "suppliers.create", RequestOptions::AUTHENTICATED, |erp| async move {
        let doc = request.to_doc()?;
        documents::create::<Supplier>(&erp, &doc).await
    })
    .await
}

/// PUT /api/suppliers/:id
pub async fn update_supplier(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonOrEmpty(request): JsonOrEmpty<UpdateSupplierRequest>,
) -> Response {
    handle_api_request(&state, "suppliers.update", RequestOptions::AUTHENTICATED, |erp| async move {
        let patch = request.to_patch()?;
        documents::update::<Supplier>(&erp, &id, patch).await
    })
    .await
}

/// DELETE /api/suppliers/:id
pub async fn delete_supplier(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "suppliers.delete", RequestOptions::AUTHENTICATED, |erp| async move {
        documents::delete::<Supplier>(&erp, &id).await
    })
    .await
}
