//! 테스트용 인메모리 저장소
//!
//! MongoDB 없이 서비스와 코디네이터를 검증하기 위한 트랜잭션 저장소입니다.
//!
//! - 트랜잭션은 전역 잠금을 잡고 테이블 사본에 쓰기를 모은 뒤, 커밋 시 한 번에 반영합니다.
//! - 중단하거나 세션을 drop하면 사본은 버려집니다.
//! - 트랜잭션 밖의 연산은 잠금을 잠깐 잡고 바로 반영합니다.
//! - 커밋 시 일시적 충돌과 저장소 장애를 주입할 수 있습니다.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult, UniqueField};
use crate::db::TransactionalStorage;
use crate::domain::entities::users::{Credential, ProfileDraft, ProfileId, UserProfile};
use crate::domain::models::{Pagination, ProfileField, ProfileFilter, UpdateMask};
use crate::repositories::{CredentialStore, ProfileStore};
use crate::services::password::PasswordHasher;

#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// 삽입 순서 = 식별자 오름차순
    pub profiles: Vec<UserProfile>,
    pub credentials: Vec<Credential>,
}

impl Tables {
    fn check_profile_unique(&self, candidate: &UserProfile) -> AppResult<()> {
        let others = self.profiles.iter().filter(|p| p.id != candidate.id);
        for other in others {
            if other.email == candidate.email {
                return Err(AppError::Conflict(UniqueField::Email));
            }
            if candidate.nickname.is_some() && other.nickname == candidate.nickname {
                return Err(AppError::Conflict(UniqueField::Nickname));
            }
        }
        Ok(())
    }

    fn profile_index(&self, id: &str) -> AppResult<usize> {
        ProfileId::parse(id)
            .and_then(|id| self.profiles.iter().position(|p| p.id == id))
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }
}

pub struct MemorySession {
    guard: Option<OwnedMutexGuard<Tables>>,
    staged: Option<Tables>,
}

impl MemorySession {
    fn staged_mut(&mut self) -> AppResult<&mut Tables> {
        self.staged
            .as_mut()
            .ok_or_else(|| AppError::InternalError("no active transaction".to_string()))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    tables: Arc<Mutex<Tables>>,
    sessions_started: AtomicU32,
    failing_commits: AtomicU32,
    offline: AtomicBool,
    ping_delay_ms: AtomicU64,
    commit_delay_ms: AtomicU64,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn snapshot(&self) -> Tables {
        self.tables.lock().await.clone()
    }

    pub fn sessions_started(&self) -> u32 {
        self.sessions_started.load(Ordering::SeqCst)
    }

    /// 다음 `count`번의 커밋을 일시적 충돌로 실패시킵니다.
    pub fn fail_next_commits(&self, count: u32) {
        self.failing_commits.store(count, Ordering::SeqCst);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_ping_delay(&self, delay: Duration) {
        self.ping_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// 커밋이 테이블에 반영되기 전에 잠시 멈추게 합니다.
    pub fn set_commit_delay(&self, delay: Duration) {
        self.commit_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::StorageUnavailable("memory storage is offline".to_string()));
        }
        Ok(())
    }

    /// 세션이 있으면 트랜잭션 사본에, 없으면 공유 테이블에 바로 적용합니다.
    async fn apply<R>(
        &self,
        session: Option<&mut MemorySession>,
        f: impl FnOnce(&mut Tables) -> AppResult<R> + Send,
    ) -> AppResult<R> {
        self.check_online()?;
        match session {
            Some(session) => f(session.staged_mut()?),
            None => {
                let mut tables = self.tables.lock().await;
                f(&mut *tables)
            }
        }
    }
}

#[async_trait]
impl TransactionalStorage<MemorySession> for MemoryStorage {
    async fn start_session(&self) -> AppResult<MemorySession> {
        self.check_online()?;
        self.sessions_started.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession { guard: None, staged: None })
    }

    async fn begin(&self, session: &mut MemorySession) -> AppResult<()> {
        self.check_online()?;
        let guard = Arc::clone(&self.tables).lock_owned().await;
        session.staged = Some(guard.clone());
        session.guard = Some(guard);
        Ok(())
    }

    async fn commit(&self, session: &mut MemorySession) -> AppResult<()> {
        let delay = self.commit_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let staged = session.staged.take();
        let guard = session.guard.take();

        let pending = self.failing_commits.load(Ordering::SeqCst);
        if pending > 0 {
            self.failing_commits.store(pending - 1, Ordering::SeqCst);
            return Err(AppError::TransientConflict("injected write conflict".to_string()));
        }

        match (guard, staged) {
            (Some(mut guard), Some(staged)) => {
                *guard = staged;
                Ok(())
            }
            _ => Err(AppError::InternalError("no active transaction".to_string())),
        }
    }

    async fn abort(&self, session: &mut MemorySession) -> AppResult<()> {
        session.staged = None;
        session.guard = None;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let delay = self.ping_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.check_online()
    }
}

fn apply_mask(profile: &mut UserProfile, draft: &ProfileDraft, mask: &UpdateMask) {
    for field in mask.fields() {
        let value = field.draft_value_of(draft).unwrap_or_default().to_string();
        match field {
            ProfileField::FirstName => profile.first_name = value,
            ProfileField::LastName => profile.last_name = value,
            ProfileField::Nickname => profile.nickname = Some(value).filter(|v| !v.is_empty()),
            ProfileField::Email => profile.email = value,
            ProfileField::Country => profile.country = value,
        }
    }
}

pub struct MemoryProfileStore {
    storage: Arc<MemoryStorage>,
}

impl MemoryProfileStore {
    pub fn new(storage: Arc<MemoryStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ProfileStore<MemorySession> for MemoryProfileStore {
    async fn count(&self, session: Option<&mut MemorySession>, filter: &ProfileFilter) -> AppResult<u64> {
        self.storage
            .apply(session, |tables| {
                Ok(tables.profiles.iter().filter(|p| filter.matches(p)).count() as u64)
            })
            .await
    }

    async fn list(
        &self,
        session: Option<&mut MemorySession>,
        filter: &ProfileFilter,
        pagination: Pagination,
    ) -> AppResult<Vec<UserProfile>> {
        self.storage
            .apply(session, |tables| {
                Ok(tables
                    .profiles
                    .iter()
                    .filter(|p| filter.matches(p))
                    .skip(pagination.skip() as usize)
                    .take(pagination.limit() as usize)
                    .cloned()
                    .collect())
            })
            .await
    }

    async fn get(&self, session: Option<&mut MemorySession>, id: &str) -> AppResult<UserProfile> {
        self.storage
            .apply(session, |tables| {
                let index = tables.profile_index(id)?;
                Ok(tables.profiles[index].clone())
            })
            .await
    }

    async fn insert(&self, session: Option<&mut MemorySession>, draft: &ProfileDraft) -> AppResult<UserProfile> {
        self.storage
            .apply(session, |tables| {
                let profile = UserProfile::from_draft(ProfileId::generate(), draft);
                tables.check_profile_unique(&profile)?;
                tables.profiles.push(profile.clone());
                Ok(profile)
            })
            .await
    }

    async fn update_by_mask(
        &self,
        session: Option<&mut MemorySession>,
        id: &str,
        draft: &ProfileDraft,
        mask: &UpdateMask,
    ) -> AppResult<UserProfile> {
        self.storage
            .apply(session, |tables| {
                let index = tables.profile_index(id)?;
                let mut updated = tables.profiles[index].clone();
                apply_mask(&mut updated, draft, mask);
                tables.check_profile_unique(&updated)?;
                tables.profiles[index] = updated.clone();
                Ok(updated)
            })
            .await
    }

    async fn delete(&self, session: Option<&mut MemorySession>, id: &str) -> AppResult<String> {
        self.storage
            .apply(session, |tables| {
                let index = tables.profile_index(id)?;
                Ok(tables.profiles.remove(index).email)
            })
            .await
    }
}

pub struct MemoryCredentialStore {
    storage: Arc<MemoryStorage>,
    hasher: PasswordHasher,
}

impl MemoryCredentialStore {
    pub fn new(storage: Arc<MemoryStorage>) -> Self {
        Self {
            storage,
            hasher: PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 }),
        }
    }
}

#[async_trait]
impl CredentialStore<MemorySession> for MemoryCredentialStore {
    async fn upsert(&self, session: Option<&mut MemorySession>, email: &str, password: &str) -> AppResult<()> {
        let credential = Credential {
            email: email.to_string(),
            password_hash: self.hasher.hash(password).await?,
        };

        self.storage
            .apply(session, |tables| {
                match tables.credentials.iter_mut().find(|c| c.email == credential.email) {
                    Some(existing) => *existing = credential,
                    None => tables.credentials.push(credential),
                }
                Ok(())
            })
            .await
    }

    async fn verify(&self, session: Option<&mut MemorySession>, email: &str, password: &str) -> AppResult<bool> {
        let hash = self
            .storage
            .apply(session, |tables| {
                tables
                    .credentials
                    .iter()
                    .find(|c| c.email == email)
                    .map(|c| c.password_hash.clone())
                    .ok_or_else(|| AppError::NotFound(format!("no credential for {}", email)))
            })
            .await?;

        self.hasher.verify(password, &hash).await
    }

    async fn delete(&self, session: Option<&mut MemorySession>, email: &str) -> AppResult<()> {
        self.storage
            .apply(session, |tables| {
                tables.credentials.retain(|c| c.email != email);
                Ok(())
            })
            .await
    }

    async fn rename(&self, session: Option<&mut MemorySession>, from: &str, to: &str) -> AppResult<()> {
        self.storage
            .apply(session, |tables| {
                if from != to && tables.credentials.iter().any(|c| c.email == to) {
                    return Err(AppError::Conflict(UniqueField::Email));
                }
                let credential = tables
                    .credentials
                    .iter_mut()
                    .find(|c| c.email == from)
                    .ok_or_else(|| AppError::NotFound(format!("no credential for {}", from)))?;
                credential.email = to.to_string();
                Ok(())
            })
            .await
    }
}
