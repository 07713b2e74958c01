//! # Application Error Handling System
//!
//! 사용자 계정 서비스 전역에서 사용하는 에러 분류 체계입니다.
//! 저장소 계층에서 발생한 저수준 신호(중복 키, 일시적 트랜잭션 충돌, 연결 실패)를
//! 도메인 수준의 결과로 변환하여 호출자에게 전달합니다.
//!
//! ## 에러 분류
//!
//! | 변형 | 의미 | HTTP |
//! |------|------|------|
//! | `NotFound` | 식별자/이메일에 해당하는 레코드 없음 | 404 |
//! | `Conflict` | 유니크 제약 위반 (필드 포함) | 409 |
//! | `InvalidCredentials` | 비밀번호 불일치 | 403 |
//! | `InvalidMask` | 업데이트 마스크 구조 오류 | 400 |
//! | `ValidationFailed` | 필드 내용 검증 실패 | 400 |
//! | `StorageUnavailable` | 저장소 연결/전송 실패 | 503 |
//! | `TransientConflict` | 재시도 가능한 트랜잭션 충돌 (내부 전용) | 500 |
//!
//! ## 전파 정책
//!
//! 도메인 에러(`NotFound`, `Conflict`, `InvalidCredentials`, `InvalidMask`)는
//! 최초 발생 시 그대로 반환되며 재시도되지 않습니다.
//! `TransientConflict`는 [`TransactionCoordinator`](crate::db::transaction::TransactionCoordinator)가
//! 흡수하며, 재시도 한도를 넘기면 `StorageUnavailable`로 변환됩니다.
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, UniqueField};
//!
//! match service.create_user(draft, "secret").await {
//!     Ok(profile) => println!("created {}", profile.id),
//!     Err(AppError::Conflict(UniqueField::Email)) => println!("email taken"),
//!     Err(e) => return Err(e),
//! }
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// 유니크 제약이 걸린 프로필 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    Email,
    Nickname,
}

impl UniqueField {
    /// 외부에 노출되는 필드 경로 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::Nickname => "nickname",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 식별자 또는 이메일에 해당하는 레코드가 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 유니크 제약 위반 - 충돌한 필드를 함께 전달
    #[error("Conflict error: user with this {0} already exists")]
    Conflict(UniqueField),

    /// 비밀번호 검증 실패
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 업데이트 마스크가 구조적으로 잘못됨
    #[error("Invalid update mask: {0}")]
    InvalidMask(String),

    /// 필드 내용 검증 실패 (API 계층이 생성, 코어는 그대로 전달)
    #[error("Validation error: {0}")]
    ValidationFailed(String),

    /// 저장소 연결 또는 전송 실패
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// 재시도 가능한 트랜잭션 충돌. 호출자에게는 노출되지 않습니다.
    #[error("Transient transaction conflict: {0}")]
    TransientConflict(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 재시도해도 의미가 바뀌지 않는 일시적 충돌인지 확인합니다.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::TransientConflict(_))
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::FORBIDDEN,
            AppError::InvalidMask(_) | AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::TransientConflict(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let mut body = serde_json::json!({ "error": self.to_string() });
        if let AppError::Conflict(field) = self {
            body["field"] = serde_json::json!(field);
        }

        actix_web::HttpResponse::build(self.status_code()).json(body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
