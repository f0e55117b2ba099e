//! Item Endpoints

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::{
    extract::{JsonBody, JsonOrEmpty, PathParam, QueryParams},
    handler::{handle_api_request, RequestOptions},
    models::{CreateItemRequest, Item, UpdateItemRequest},
    services::{documents, erp::{ListArgs, SortOrder}},
    types::page_size,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ItemListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub item_group: Option<String>,
    /// true 면 재고 품목만
    pub is_stock_item: Option<bool>,
    pub search: Option<String>,
}

impl ItemListQuery {
    pub fn to_args(&self) -> ListArgs {
        ListArgs::new()
            .filter_opt("item_group", "=", self.item_group.clone())
            .filter_opt("is_stock_item", "=", self.is_stock_item.map(i64::from))
            .filter_opt("item_name", "like", self.search.as_ref().map(|term| format!("%{}%", term)))
            .order_by("modified", SortOrder::Desc)
            .limit(page_size(self.limit))
            .start(self.offset.unwrap_or(0))
    }
}

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ItemListQuery>,
) -> Response {
    handle_api_request(&state, "items.list", RequestOptions::PUBLIC, |erp| async move {
        documents::list::<Item>(&erp, query.to_args()).await
    })
    .await
}

/// GET /api/items/:id
pub async fn get_item(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "items.get", RequestOptions::PUBLIC, |erp| async move {
        documents::get::<Item>(&erp, &id).await
    })
    .await
}

/// POST /api/items
pub async fn create_item(State(state): State<AppState>, JsonBody(request): JsonBody<CreateItemRequest>) -> Response {
    handle_api_request(&state, "items.create", RequestOptions::AUTHENTICATED, |erp| async move {
        let doc = request.to_doc()?;
        documents::create::<Item>(&erp, &doc).await
    })
    .await
}

/// PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonOrEmpty(request): JsonOrEmpty<UpdateItemRequest>,
) -> Response {
    handle_api_request(&state, "items.update", RequestOptions::AUTHENTICATED, |erp| async move {
        let patch = request.to_patch()?;
        documents::update::<Item>(&erp, &id, patch).await
    })
    .await
}

/// DELETE /api/items/:id
pub async fn delete_item(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "items.delete", RequestOptions::AUTHENTICATED, |erp| async move {
        documents::delete::<Item>(&erp, &id).await
    })
    .await
}
