//! # Domain Layer
//!
//! 사용자 집합체(프로필 + 자격 증명)의 도메인 모델을 정의하는 계층입니다.
//!
//! ```text
//! domain/
//! ├── entities/     ← UserProfile, ProfileId, Credential
//! ├── models/       ← Pagination, ProfileFilter, UpdateMask, ProfileField
//! ├── validation    ← 필드 검증 규칙 테이블
//! └── dto/          ← HTTP 요청/응답 형태
//! ```

pub mod entities;
pub mod models;
pub mod validation;
pub mod dto;
