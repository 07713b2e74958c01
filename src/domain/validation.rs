//! 프로필 필드 검증 규칙 테이블
//!
//! 필드마다 "언제 필수인가"와 "어떤 형식이어야 하는가"를 명시적인 표로 정의하고,
//! 검증 종류(생성/업데이트/필터)에 따라 평가합니다.
//!
//! | 필드 | 생성 시 필수 | 형식 |
//! |------|-------------|------|
//! | `first_name` | 예 | 알파벳 (ASCII) |
//! | `last_name` | 예 | 알파벳 (ASCII) |
//! | `nickname` | 아니오 | 알파벳/숫자 (ASCII) |
//! | `email` | 예 | 이메일 |
//! | `country` | 예 | 제한 없음 |
//!
//! 업데이트에서는 마스크에 포함된 필드가 필수가 됩니다. 단, 닉네임은 비워서 제거할 수 있습니다.

use std::collections::BTreeMap;

use validator::ValidateEmail;

use crate::core::errors::AppError;
use crate::domain::entities::users::ProfileDraft;
use crate::domain::models::{ProfileField, ProfileFilter, UpdateMask};

/// 검증 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Create,
    Update,
    Filter,
}

/// 필드 값 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Alpha,
    AlphaNumeric,
    Email,
    Any,
}

impl Pattern {
    fn accepts(&self, value: &str) -> bool {
        match self {
            Pattern::Alpha => value.chars().all(|c| c.is_ascii_alphabetic()),
            Pattern::AlphaNumeric => value.chars().all(|c| c.is_ascii_alphanumeric()),
            Pattern::Email => value.validate_email(),
            Pattern::Any => true,
        }
    }

    fn message(&self, field: ProfileField) -> String {
        match self {
            Pattern::Alpha => {
                format!("The field '{}' should contain only alpha characters.", field)
            }
            Pattern::AlphaNumeric => {
                format!("The field '{}' should contain only alpha-numeric characters.", field)
            }
            Pattern::Email => format!("The field '{}' is not a valid email.", field),
            Pattern::Any => format!("The field '{}' is invalid.", field),
        }
    }
}

/// 필드 하나에 대한 규칙
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: ProfileField,
    pub required_on_create: bool,
    pub pattern: Pattern,
}

pub const PROFILE_RULES: [FieldRule; 5] = [
    FieldRule { field: ProfileField::FirstName, required_on_create: true, pattern: Pattern::Alpha },
    FieldRule { field: ProfileField::LastName, required_on_create: true, pattern: Pattern::Alpha },
    FieldRule { field: ProfileField::Nickname, required_on_create: false, pattern: Pattern::AlphaNumeric },
    FieldRule { field: ProfileField::Email, required_on_create: true, pattern: Pattern::Email },
    FieldRule { field: ProfileField::Country, required_on_create: true, pattern: Pattern::Any },
];

/// 필드별 검증 실패 메시지 모음
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<ProfileField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// 대표 메시지 하나 (필드 순서상 첫 번째)
    pub fn one(&self) -> Option<&str> {
        self.errors.values().next().map(String::as_str)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationFailed(errors.one().unwrap_or("Invalid input data").to_string())
    }
}

impl FieldRule {
    /// 검증 종류에 따라 이 필드가 필수인지 판단합니다.
    pub fn is_required(&self, kind: ValidationKind, mask: Option<&UpdateMask>) -> bool {
        match kind {
            ValidationKind::Create => self.required_on_create,
            ValidationKind::Update => {
                self.field != ProfileField::Nickname
                    && mask.is_some_and(|mask| mask.contains(self.field))
            }
            ValidationKind::Filter => false,
        }
    }
}

fn evaluate<'a>(
    kind: ValidationKind,
    mask: Option<&UpdateMask>,
    value_of: impl Fn(ProfileField) -> Option<&'a str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for rule in PROFILE_RULES.iter() {
        match value_of(rule.field).filter(|value| !value.is_empty()) {
            None if rule.is_required(kind, mask) => {
                errors
                    .errors
                    .insert(rule.field, format!("The field '{}' is required.", rule.field));
            }
            None => {}
            Some(value) if !rule.pattern.accepts(value) => {
                errors.errors.insert(rule.field, rule.pattern.message(rule.field));
            }
            Some(_) => {}
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// 계정 생성 입력을 검증합니다.
pub fn validate_create(draft: &ProfileDraft) -> Result<(), ValidationErrors> {
    evaluate(ValidationKind::Create, None, |field| field.draft_value_of(draft))
}

/// 부분 업데이트 입력을 검증합니다. 마스크에 없는 필드는 형식만 확인합니다.
pub fn validate_update(draft: &ProfileDraft, mask: &UpdateMask) -> Result<(), ValidationErrors> {
    evaluate(ValidationKind::Update, Some(mask), |field| field.draft_value_of(draft))
}

/// 목록 조회 필터를 검증합니다. 모든 필드가 선택 사항입니다.
pub fn validate_filter(filter: &ProfileFilter) -> Result<(), ValidationErrors> {
    let values: BTreeMap<ProfileField, &str> = filter.predicates().into_iter().collect();
    evaluate(ValidationKind::Filter, None, |field| values.get(&field).copied())
}
