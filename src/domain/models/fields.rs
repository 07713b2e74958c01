use std::fmt;

use crate::domain::entities::users::{ProfileDraft, UserProfile};

/// 사용자가 설정할 수 있는 프로필 필드
///
/// 외부 경로 이름(`first_name`)과 저장소 키(`firstName`)를 함께 관리합니다.
/// 식별자는 설정할 수 없으므로 여기에 포함되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileField {
    FirstName,
    LastName,
    Nickname,
    Email,
    Country,
}

impl ProfileField {
    pub const ALL: [ProfileField; 5] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Nickname,
        ProfileField::Email,
        ProfileField::Country,
    ];

    /// 업데이트 마스크와 검증 메시지에 쓰이는 경로 이름
    pub fn path(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "first_name",
            ProfileField::LastName => "last_name",
            ProfileField::Nickname => "nickname",
            ProfileField::Email => "email",
            ProfileField::Country => "country",
        }
    }

    /// MongoDB 문서 키
    pub fn storage_key(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::Nickname => "nickname",
            ProfileField::Email => "email",
            ProfileField::Country => "country",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.path() == path)
    }

    pub fn value_of<'a>(&self, profile: &'a UserProfile) -> Option<&'a str> {
        match self {
            ProfileField::FirstName => Some(profile.first_name.as_str()),
            ProfileField::LastName => Some(profile.last_name.as_str()),
            ProfileField::Nickname => profile.nickname.as_deref(),
            ProfileField::Email => Some(profile.email.as_str()),
            ProfileField::Country => Some(profile.country.as_str()),
        }
    }

    pub fn draft_value_of<'a>(&self, draft: &'a ProfileDraft) -> Option<&'a str> {
        match self {
            ProfileField::FirstName => Some(draft.first_name.as_str()),
            ProfileField::LastName => Some(draft.last_name.as_str()),
            ProfileField::Nickname => draft.nickname.as_deref(),
            ProfileField::Email => Some(draft.email.as_str()),
            ProfileField::Country => Some(draft.country.as_str()),
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
