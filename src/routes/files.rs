//! File Upload Endpoint
//!
//! multipart 대신 raw body 를 받아 ERP `upload_file` 로 그대로 전달한다.
//!
//! ```text
//! POST /api/files?file_name=invoice.pdf&doctype=Sales%20Invoice&docname=SINV-0001&is_private=true
//! Content-Type: application/octet-stream
//!
//! <bytes>
//! ```

use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::{
    error::ApiError,
    extract::{QueryParams, RawBody},
    handler::{handle_api_request, RequestOptions},
    models::{require, UploadedFile},
    services::erp::FileUpload,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    pub file_name: Option<String>,
    pub doctype: Option<String>,
    pub docname: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

impl UploadQuery {
    pub fn into_upload(self, content: Vec<u8>) -> Result<FileUpload, ApiError> {
        let file_name = require(&self.file_name, "file_name")?;
        if content.is_empty() {
            return Err(ApiError::required("file"));
        }
        // 첨부 대상은 둘 다 있거나 둘 다 없어야 함
        if self.doctype.is_some() != self.docname.is_some() {
            return Err(ApiError::application("doctype and docname are required together"));
        }

        Ok(FileUpload {
            file_name,
            content,
            doctype: self.doctype,
            docname: self.docname,
            is_private: self.is_private,
        })
    }
}

/// POST /api/files
pub async fn upload_file(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UploadQuery>,
    RawBody(body): RawBody,
) -> Response {
    handle_api_request(&state, "files.upload", RequestOptions::AUTHENTICATED, |erp| async move {
        let upload = query.into_upload(body.to_vec())?;
        let doc = erp.file().upload(upload).await?;
        Ok(UploadedFile::from_doc(&doc))
    })
    .await
}
