use super::fields::ProfileField;
use crate::domain::entities::users::UserProfile;

/// 프로필 형태의 희소 필터
///
/// 비어 있지 않은 필드마다 정확히 일치하는 조건이 하나씩 생깁니다(접두사/유사 일치 아님).
/// 비어 있는 필드는 조건에서 제외되며, 식별자는 필터로 사용되지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
}

impl ProfileFilter {
    /// 필드와 기대값의 쌍으로 조건을 나열합니다. 빈 값은 제외됩니다.
    pub fn predicates(&self) -> Vec<(ProfileField, &str)> {
        [
            (ProfileField::FirstName, &self.first_name),
            (ProfileField::LastName, &self.last_name),
            (ProfileField::Nickname, &self.nickname),
            (ProfileField::Email, &self.email),
            (ProfileField::Country, &self.country),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value.as_deref().filter(|v| !v.is_empty()).map(|v| (field, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    /// 메모리 상에서 프로필이 조건을 모두 만족하는지 확인합니다.
    pub fn matches(&self, profile: &UserProfile) -> bool {
        self.predicates()
            .into_iter()
            .all(|(field, expected)| field.value_of(profile) == Some(expected))
    }
}
