use super::fields::ProfileField;
use crate::core::errors::{AppError, AppResult};

/// 부분 업데이트가 건드릴 수 있는 필드 목록 (순서 유지, 중복 없음)
///
/// 마스크에 없는 필드는 입력 구조체에 다른 값이 들어 있어도 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMask {
    fields: Vec<ProfileField>,
}

impl UpdateMask {
    /// 경로 이름 목록에서 마스크를 만듭니다.
    ///
    /// # Errors
    ///
    /// * 빈 목록
    /// * 식별자(`id`) 경로 포함
    /// * 설정할 수 없거나 알 수 없는 경로
    ///
    /// 위 경우 모두 `AppError::InvalidMask`를 반환합니다.
    pub fn parse<S: AsRef<str>>(paths: &[S]) -> AppResult<Self> {
        if paths.is_empty() {
            return Err(AppError::InvalidMask("update mask must not be empty".to_string()));
        }

        let mut fields = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            if path == "id" {
                return Err(AppError::InvalidMask("the 'id' field is immutable".to_string()));
            }
            let field = ProfileField::from_path(path)
                .ok_or_else(|| AppError::InvalidMask(format!("unknown field path '{}'", path)))?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[ProfileField] {
        &self.fields
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.fields.contains(&field)
    }
}
