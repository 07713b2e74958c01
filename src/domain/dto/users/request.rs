//! 사용자 API 요청 DTO
//!
//! HTTP 요청 본문/쿼리를 표현하며, 코어가 이해하는 값 객체로 변환하는 책임을 가집니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::users::ProfileDraft;
use crate::domain::models::{Pagination, ProfileFilter};

/// 프로필 필드 묶음 (생성, 부분 업데이트 입력에 공통 사용)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilePayload {
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub email: String,
    pub country: String,
}

impl From<ProfilePayload> for ProfileDraft {
    fn from(payload: ProfilePayload) -> Self {
        let ProfilePayload { first_name, last_name, nickname, email, country } = payload;
        Self { first_name, last_name, nickname, email, country }
    }
}

/// 계정 생성 요청
///
/// ```json
/// {
///   "user": { "first_name": "John", "last_name": "Doe", "email": "john@example.com", "country": "UK" },
///   "password": "secret"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user: ProfilePayload,
    #[serde(default)]
    pub password: String,
}

/// 부분 업데이트 요청. `update_mask`에 나열된 필드만 적용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user: ProfilePayload,
    #[serde(default)]
    pub update_mask: Vec<String>,
}

/// 비밀번호 변경 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(email)]
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

/// 목록 조회 쿼리. 0 또는 누락된 페이지 값은 기본값으로 대체됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListUsersQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub page: u32,
    pub size: u32,
}

impl ListUsersQuery {
    pub fn filter(&self) -> ProfileFilter {
        ProfileFilter {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            nickname: self.nickname.clone(),
            email: self.email.clone(),
            country: self.country.clone(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListUsersQuery = serde_json::from_str("{}").unwrap();
        let pagination = query.pagination();

        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_size(), 15);
        assert!(query.filter().is_empty());
    }

    #[test]
    fn test_update_password_request_rejects_bad_email() {
        let request = UpdatePasswordRequest {
            email: "not-an-email".to_string(),
            old_password: "p1".to_string(),
            new_password: "p2".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_profile_payload_into_draft() {
        let payload: ProfilePayload =
            serde_json::from_str(r#"{"first_name":"Mark","email":"mark@x.com"}"#).unwrap();
        let draft = ProfileDraft::from(payload);

        assert_eq!(draft.first_name, "Mark");
        assert_eq!(draft.nickname, None);
        assert!(draft.country.is_empty());
    }
}
