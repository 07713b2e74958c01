//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - 요청 검증, 에러 → 상태 코드   ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   UserService - 계정 단위 일관성                  ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   ProfileStore / CredentialStore                ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 `web::Data<UserService<S>>`로 서비스를 받습니다. 에러는
//! [`AppError`](crate::core::errors::AppError)의 `ResponseError` 구현이 상태 코드로 변환합니다.

pub mod health;
pub mod users;
