//! MongoDB 에러 분류
//!
//! 드라이버 에러를 한 곳에서 도메인 에러로 변환합니다.
//!
//! - 중복 키(코드 11000) → `Conflict(field)` (위반된 인덱스 이름으로 필드 판별)
//! - `TransientTransactionError` 라벨 → `TransientConflict`
//! - 그 외 → `StorageUnavailable`

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure, TRANSIENT_TRANSACTION_ERROR};

use crate::core::errors::{AppError, UniqueField};

pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// 이메일 유니크 인덱스 이름 (profiles, credentials 공통)
pub const EMAIL_INDEX: &str = "email_unique";
/// 닉네임 부분 유니크 인덱스 이름
pub const NICKNAME_INDEX: &str = "nickname_unique";

/// 드라이버 에러를 도메인 에러로 변환합니다.
pub fn storage_error(err: MongoError) -> AppError {
    if let Some(field) = duplicate_key_field(&err) {
        return AppError::Conflict(field);
    }
    if err.contains_label(TRANSIENT_TRANSACTION_ERROR) {
        return AppError::TransientConflict(err.to_string());
    }
    AppError::StorageUnavailable(err.to_string())
}

/// 중복 키 에러라면 충돌한 필드를 돌려줍니다.
pub fn duplicate_key_field(err: &MongoError) -> Option<UniqueField> {
    let message = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            write_error.message.as_str()
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            command_error.message.as_str()
        }
        _ => return None,
    };
    Some(field_for_duplicate_message(message))
}

/// "E11000 duplicate key error collection: db.profiles index: nickname_unique dup key: ..."
/// 형태의 메시지에서 필드를 판별합니다. 두 컬렉션 모두 닉네임 외의 유니크 인덱스는 이메일뿐입니다.
pub fn field_for_duplicate_message(message: &str) -> UniqueField {
    if message.contains(NICKNAME_INDEX) {
        UniqueField::Nickname
    } else {
        UniqueField::Email
    }
}
