//! User Profile Entity
//!
//! 사용자 프로필 엔티티와 식별자, 생성/부분 업데이트 입력 형태를 정의합니다.
//! 자격 증명은 별도 컬렉션([`Credential`](super::credential::Credential))에 저장되며
//! 이메일로 연결됩니다.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 저장소가 생성하는 불변 프로필 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(ObjectId);

impl ProfileId {
    /// 새 식별자를 생성합니다. 같은 프로세스 안에서는 생성 순서대로 증가합니다.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// 16진수 문자열을 파싱합니다. 형식이 잘못되면 `None`.
    pub fn parse(hex: &str) -> Option<Self> {
        ObjectId::parse_str(hex).ok().map(Self)
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for ProfileId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// 사용자 프로필
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    /// 값이 있을 때만 유니크 제약이 적용됩니다.
    pub nickname: Option<String>,
    pub email: String,
    pub country: String,
}

impl UserProfile {
    /// 초안과 생성된 식별자로 프로필을 만듭니다.
    pub fn from_draft(id: ProfileId, draft: &ProfileDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            nickname: draft.normalized_nickname(),
            email: draft.email.clone(),
            country: draft.country.clone(),
        }
    }
}

/// 식별자가 없는 프로필 형태
///
/// 계정 생성 입력이자, 업데이트 마스크와 함께 쓰이는 부분 업데이트 입력입니다.
/// 부분 업데이트에서는 마스크에 포함된 필드만 의미를 가집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub email: String,
    pub country: String,
}

impl ProfileDraft {
    /// 빈 닉네임은 "닉네임 없음"으로 취급합니다.
    pub fn normalized_nickname(&self) -> Option<String> {
        self.nickname.clone().filter(|nickname| !nickname.is_empty())
    }
}
