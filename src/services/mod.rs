//! Services Module
//!
//! # Services
//! - `erp`: ERP 클라이언트 어댑터 (문서 CRUD, 메서드 호출, 인증, 파일)
//! - `documents`: 리소스 라우트 공통 흐름 (목록/hydrate/부분 수정)

pub mod documents;
pub mod erp;
