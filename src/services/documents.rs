//! Document Service
//!
//! 리소스 라우트가 공유하는 조회/저장 흐름. DTO 타입(`ErpDoc`)만 바꿔 재사용한다.
//!
//! # Interview Q&A
//!
//! Q: 목록에서 child table 은 어떻게 가져오나?
//! A: 2단계 hydrate
//!    1. 목록 API 로 `name` 만 조회
//!    2. 각 문서를 `join_all` 로 병렬 조회 (개수는 목록 limit 으로 제한)
//!    - 일부 실패 시 성공한 항목만 `items` 에, 실패한 id 는 `failed` 에 기록
//!
//! Q: PATCH 가 없는 ERP 에서 부분 수정은?
//! A: 현재 문서 조회 → 보낸 필드만 덮어쓰기 → 전체 PUT
//!    - 보낸 필드가 없으면 쓰기 없이 현재 문서를 그대로 반환

use futures::future::join_all;
use serde_json::Value;

use crate::{
    error::ApiError,
    models::{merge_patch, ErpDoc, Patch},
    services::erp::{ErpClient, ListArgs},
    types::{DeleteResponse, HydrationFailure, ListResponse},
};

/// 단건 조회 (실패 시 요청 전체 실패)
pub async fn get<D: ErpDoc>(erp: &ErpClient, name: &str) -> Result<D, ApiError> {
    let doc = erp.db().get_doc(D::DOCTYPE, name).await?;
    Ok(D::from_doc(&doc))
}

/// 목록 API 결과를 그대로 매핑
pub async fn list<D: ErpDoc>(erp: &ErpClient, args: ListArgs) -> Result<ListResponse<D>, ApiError> {
    let rows = erp
        .db()
        .get_doc_list(D::DOCTYPE, &args.fields(D::LIST_FIELDS))
        .await?;
    Ok(ListResponse::complete(rows.iter().map(D::from_doc).collect()))
}

/// `name` 목록 조회 후 hydrate
pub async fn list_hydrated<D: ErpDoc>(
    erp: &ErpClient,
    args: ListArgs,
) -> Result<ListResponse<D>, ApiError> {
    let rows = erp
        .db()
        .get_doc_list(D::DOCTYPE, &args.fields(&["name"]))
        .await?;

    let names: Vec<String> = rows
        .iter()
        .filter_map(|row| row.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    Ok(hydrate(erp, &names).await)
}

/// 문서 전체를 병렬 조회
///
/// 결과 순서는 `names` 순서를 유지한다.
pub async fn hydrate<D: ErpDoc>(erp: &ErpClient, names: &[String]) -> ListResponse<D> {
    let fetches = names.iter().map(|name| async move {
        let result = erp.db().get_doc(D::DOCTYPE, name).await;
        (name, result)
    });

    let mut items = Vec::with_capacity(names.len());
    let mut failed = Vec::new();

    for (name, result) in join_all(fetches).await {
        match result {
            Ok(doc) => items.push(D::from_doc(&doc)),
            Err(err) => {
                tracing::warn!(doctype = D::DOCTYPE, %name, error = %err, "hydrate failed, dropping item");
                failed.push(HydrationFailure {
                    id: name.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    ListResponse { items, failed }
}

pub async fn create<D: ErpDoc>(erp: &ErpClient, doc: &Value) -> Result<D, ApiError> {
    let created = erp.db().create_doc(D::DOCTYPE, doc).await?;
    Ok(D::from_doc(&created))
}

/// 부분 수정 (빈 patch 는 쓰기 없음)
pub async fn update<D: ErpDoc>(erp: &ErpClient, name: &str, patch: Patch) -> Result<D, ApiError> {
    let current = erp.db().get_doc(D::DOCTYPE, name).await?;

    if patch.is_empty() {
        tracing::debug!(doctype = D::DOCTYPE, name, "empty update, skipping write");
        return Ok(D::from_doc(&current));
    }

    let merged = merge_patch(current, patch);
    let saved = erp.db().update_doc(D::DOCTYPE, name, &merged).await?;
    Ok(D::from_doc(&saved))
}

pub async fn delete<D: ErpDoc>(erp: &ErpClient, name: &str) -> Result<DeleteResponse, ApiError> {
    erp.db().delete_doc(D::DOCTYPE, name).await?;
    Ok(DeleteResponse {
        id: name.to_string(),
        deleted: true,
    })
}
