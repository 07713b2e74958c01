//! 사용자 API 응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::UserProfile;

/// 사용자 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub email: String,
    pub country: String,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        let UserProfile { id, first_name, last_name, nickname, email, country } = profile;

        Self {
            id: id.to_hex(),
            first_name,
            last_name,
            nickname,
            email,
            country,
        }
    }
}

/// 목록 조회 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

/// 헬스 체크 응답
///
/// `status`는 `HEALTHY` 또는 `NOT_HEALTHY`입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}
