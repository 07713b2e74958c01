//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소 경계를 trait으로 정의하고 MongoDB 구현을 제공합니다.
//! 모든 연산은 선택적 세션(`Option<&mut S>`)을 받습니다. 세션이 주어지면 그 세션의
//! 트랜잭션 안에서 실행되고, `None`이면 단일 문서 연산으로 바로 실행됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::{ProfileStore, profiles::MongoProfileStore};
//!
//! let store = MongoProfileStore::new(&database);
//! let profile = store.get(None, "65f1c0ffee0000000000abcd").await?;
//! ```

pub mod credentials;
pub mod profiles;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::entities::users::{ProfileDraft, UserProfile};
use crate::domain::models::{Pagination, ProfileFilter, UpdateMask};

pub use credentials::MongoCredentialStore;
pub use profiles::MongoProfileStore;

/// 프로필 컬렉션 저장소
///
/// 목록 순서는 식별자 오름차순입니다. 식별자는 생성 순서대로 증가하므로 삽입 순서와 같습니다.
#[async_trait]
pub trait ProfileStore<S: Send>: Send + Sync {
    /// 필터와 일치하는 프로필 수
    async fn count(&self, session: Option<&mut S>, filter: &ProfileFilter) -> AppResult<u64>;

    /// 필터와 일치하는 프로필을 페이지 단위로 읽어 모두 메모리로 가져옵니다.
    async fn list(
        &self,
        session: Option<&mut S>,
        filter: &ProfileFilter,
        pagination: Pagination,
    ) -> AppResult<Vec<UserProfile>>;

    /// 형식이 잘못된 식별자도 `NotFound`로 처리합니다.
    async fn get(&self, session: Option<&mut S>, id: &str) -> AppResult<UserProfile>;

    /// 새 식별자로 프로필을 저장합니다. 이메일 또는 닉네임 중복 시 `Conflict`.
    async fn insert(&self, session: Option<&mut S>, draft: &ProfileDraft) -> AppResult<UserProfile>;

    /// 마스크에 포함된 필드만 덮어쓰고 갱신된 프로필을 반환합니다.
    async fn update_by_mask(
        &self,
        session: Option<&mut S>,
        id: &str,
        draft: &ProfileDraft,
        mask: &UpdateMask,
    ) -> AppResult<UserProfile>;

    /// 프로필을 삭제하고, 짝이 되는 자격 증명을 찾을 수 있도록 이메일을 반환합니다.
    async fn delete(&self, session: Option<&mut S>, id: &str) -> AppResult<String>;
}

/// 자격 증명 컬렉션 저장소
#[async_trait]
pub trait CredentialStore<S: Send>: Send + Sync {
    /// 새 솔트로 해시를 계산해 이메일의 자격 증명을 교체하거나 새로 만듭니다.
    async fn upsert(&self, session: Option<&mut S>, email: &str, password: &str) -> AppResult<()>;

    /// 행이 없으면 `NotFound`, 불일치는 에러가 아니라 `Ok(false)`입니다.
    async fn verify(&self, session: Option<&mut S>, email: &str, password: &str) -> AppResult<bool>;

    /// 멱등 삭제. 행이 없어도 성공입니다.
    async fn delete(&self, session: Option<&mut S>, email: &str) -> AppResult<()>;

    /// 자격 증명 행의 이메일을 바꿉니다. 행이 없으면 `NotFound`.
    async fn rename(&self, session: Option<&mut S>, from: &str, to: &str) -> AppResult<()>;
}
