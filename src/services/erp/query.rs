//! `get_doc_list` 인자
//!
//! Frappe REST는 fields / filters 를 JSON 배열 문자열로 받는다.
//! `GET /api/resource/Customer?fields=["name","customer_name"]&filters=[["disabled","=",0]]`

use serde_json::{json, Value};

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// `[field, operator, value]` 형태의 필터
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!([self.field, self.operator, self.value])
    }
}

pub fn filters_to_json(filters: &[Filter]) -> String {
    Value::Array(filters.iter().map(Filter::to_json).collect()).to_string()
}

/// 목록 조회 인자 (builder)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListArgs {
    pub fields: Vec<String>,
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, SortOrder)>,
    pub limit: Option<u32>,
    pub start: Option<u32>,
}

impl ListArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|field| field.to_string()).collect();
        self
    }

    pub fn filter(mut self, field: &str, operator: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::new(field, operator, value));
        self
    }

    /// 값이 있을 때만 필터 추가 (쿼리 파라미터용)
    pub fn filter_opt<V: Into<Value>>(self, field: &str, operator: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.filter(field, operator, value),
            None => self,
        }
    }

    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by = Some((field.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// reqwest `.query()` 에 넘길 key/value 목록
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if !self.fields.is_empty() {
            query.push(("fields", json!(self.fields).to_string()));
        }
        if !self.filters.is_empty() {
            query.push(("filters", filters_to_json(&self.filters)));
        }
        if let Some((field, order)) = &self.order_by {
            query.push(("order_by", format!("{} {}", field, order.as_str())));
        }
        if let Some(limit) = self.limit {
            query.push(("limit_page_length", limit.to_string()));
        }
        if let Some(start) = self.start {
            query.push(("limit_start", start.to_string()));
        }

        query
    }
}
