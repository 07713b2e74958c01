//! # Core Module
//!
//! 계층 전체가 공유하는 에러 타입을 제공합니다.
//!
//! - [`errors::AppError`] - 도메인 에러 분류와 HTTP 상태 코드 매핑
//! - [`errors::ErrorContext`] - 외부 라이브러리 에러에 문맥을 붙여 변환

pub mod errors;

pub use errors::*;
