//! Asset Endpoints
//!
//! 목록은 hydrate (child table `finance_books` 포함)

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::{
    extract::{JsonBody, JsonOrEmpty, PathParam, QueryParams},
    handler::{handle_api_request, RequestOptions},
    models::{Asset, CreateAssetRequest, UpdateAssetRequest},
    services::{documents, erp::{ListArgs, SortOrder}},
    types::page_size,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct AssetListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub asset_category: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl AssetListQuery {
    pub fn to_args(&self) -> ListArgs {
        ListArgs::new()
            .filter_opt("asset_category", "=", self.asset_category.clone())
            .filter_opt("location", "=", self.location.clone())
            .filter_opt("status", "=", self.status.clone())
            .order_by("modified", SortOrder::Desc)
            .limit(page_size(self.limit))
            .start(self.offset.unwrap_or(0))
    }
}

/// GET /api/assets
pub async fn list_assets(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<AssetListQuery>,
) -> Response {
    handle_api_request(&state, "assets.list", RequestOptions::PUBLIC, |erp| async move {
        documents::list_hydrated::<Asset>(&erp, query.to_args()).await
    })
    .await
}

/// GET /api/assets/:id
pub async fn get_asset(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "assets.get", RequestOptions::PUBLIC, |erp| async move {
        documents::get::<Asset>(&erp, &id).await
    })
    .await
}

/// POST /api/assets
pub async fn create_asset(State(state): State<AppState>, JsonBody(request): JsonBody<CreateAssetRequest>) -> Response {
    handle_api_request(&state, "assets.create", RequestOptions::AUTHENTICATED, |erp| async move {
        let doc = request.to_doc()?;
        documents::create::<Asset>(&erp, &doc).await
    })
    .await
}

/// PUT /api/assets/:id
pub async fn update_asset(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
    JsonOrEmpty(request): JsonOrEmpty<UpdateAssetRequest>,
) -> Response {
    handle_api_request(&state, "assets.update", RequestOptions::AUTHENTICATED, |erp| async move {
        let patch = request.to_patch()?;
        documents::update::<Asset>(&erp, &id, patch).await
    })
    .await
}

/// DELETE /api/assets/:id
pub async fn delete_asset(State(state): State<AppState>, PathParam(id): PathParam<String>) -> Response {
    handle_api_request(&state, "assets.delete", RequestOptions::AUTHENTICATED, |erp| async move {
        documents::delete::<Asset>(&erp, &id).await
    })
    .await
}
