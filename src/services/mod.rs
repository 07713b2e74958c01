//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! - [`users::UserService`] - 프로필과 자격 증명을 하나의 계정으로 다루는 파사드
//! - [`password::PasswordHasher`] - bcrypt 해시 계산과 검증
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let (users, total) = user_service.list_users(&filter, pagination).await?;
//! ```

pub mod password;
pub mod users;
