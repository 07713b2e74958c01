//! 사용자 계정 서비스 모듈
//!
//! 계정 생성, 조회, 부분 수정, 비밀번호 변경, 삭제, 헬스 체크를 제공합니다.
//!
//! # Consistency
//!
//! - 생성과 삭제는 프로필과 자격 증명을 한 트랜잭션으로 처리합니다.
//! - 변경 이벤트는 커밋 이후에만 발행됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let profile = user_service.create_user(draft, password).await?;
//! user_service.delete_user(&profile.id.to_hex()).await?;
//! ```

pub mod user_service;

pub use user_service::{HealthStatus, UserService};
