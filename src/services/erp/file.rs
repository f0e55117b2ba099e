//! 파일 업로드 (`/api/method/upload_file`, multipart)

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{take_message, ErpClient, ErpError};

/// 업로드할 파일
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content: Vec<u8>,
    /// 첨부 대상 문서 (선택)
    pub doctype: Option<String>,
    pub docname: Option<String>,
    pub is_private: bool,
}

pub struct FileClient<'a> {
    erp: &'a ErpClient,
}

impl<'a> FileClient<'a> {
    pub(super) fn new(erp: &'a ErpClient) -> Self {
        Self { erp }
    }

    /// 업로드 후 생성된 File 문서 반환
    pub async fn upload(&self, upload: FileUpload) -> Result<Value, ErpError> {
        tracing::debug!(file_name = %upload.file_name, size = upload.content.len(), "erp file.upload");
        let url = self.erp.endpoint(&["api", "method", "upload_file"])?;

        let part = Part::bytes(upload.content).file_name(upload.file_name.clone());
        let mut form = Form::new()
            .part("file", part)
            .text("file_name", upload.file_name)
            .text("is_private", if upload.is_private { "1" } else { "0" });
        if let Some(doctype) = upload.doctype {
            form = form.text("doctype", doctype);
        }
        if let Some(docname) = upload.docname {
            form = form.text("docname", docname);
        }

        let body = self.erp.send(self.erp.http().post(url).multipart(form)).await?;
        Ok(take_message(body))
    }
}
