//! File (upload_file 응답)

use serde::Serialize;
use serde_json::Value;

use super::{bool_field, i64_field, str_field};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadedFile {
    pub id: String,
    pub file_name: String,
    pub file_url: String,
    pub is_private: bool,
    pub file_size: i64,
    pub attached_to_doctype: String,
    pub attached_to_name: String,
}

impl UploadedFile {
    pub fn from_doc(doc: &Value) -> Self {
        Self {
            id: str_field(doc, "name"),
            file_name: str_field(doc, "file_name"),
            file_url: str_field(doc, "file_url"),
            is_private: bool_field(doc, "is_private"),
            file_size: i64_field(doc, "file_size"),
            attached_to_doctype: str_field(doc, "attached_to_doctype"),
            attached_to_name: str_field(doc, "attached_to_name"),
        }
    }
}
