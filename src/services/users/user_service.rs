//! # 사용자 집합체 서비스 구현
//!
//! API 계층이 호출하는 파사드입니다. 프로필과 자격 증명을 하나의 사용자 계정으로 다루며,
//! 두 컬렉션에 걸친 쓰기는 [`TransactionCoordinator`]로 묶어 원자적으로 실행합니다.
//!
//! ## 연산별 흐름
//!
//! ```text
//! create_user      ─┬─ [tx] credentials.upsert → profiles.insert ─→ notify(Created)
//! delete_user      ─┼─ [tx] profiles.delete → credentials.delete  ─→ notify(Deleted)
//! update_user      ─┼─ profiles.update_by_mask                     ─→ notify(Updated)
//!                   │   (이메일 동기화 설정 시 [tx] + credentials.rename)
//! update_password  ─┼─ credentials.verify → credentials.upsert
//! get/list/count   ─┴─ profiles (트랜잭션 없음)
//! ```
//!
//! ## 알림 규칙
//!
//! 이벤트는 커밋이 확인된 뒤에만 한 번 발행됩니다. 실패한 작업, 재시도 중인 작업은
//! 어떤 알림도 남기지 않습니다.

use std::fmt;
use std::sync::Arc;

use futures_util::FutureExt;
use log::{error, info, warn};

use crate::config::{ServiceConfig, TransactionConfig};
use crate::core::errors::{AppError, AppResult};
use crate::db::{TransactionCoordinator, TransactionalStorage};
use crate::domain::entities::users::{ProfileDraft, ProfileId, UserProfile};
use crate::domain::models::{Pagination, ProfileField, ProfileFilter, UpdateMask};
use crate::domain::validation::validate_filter;
use crate::events::{EventKind, EventNotifier};
use crate::repositories::{CredentialStore, ProfileStore};

/// 헬스 체크 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unavailable,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Unavailable => "NOT_HEALTHY",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 사용자 계정 비즈니스 로직 서비스
///
/// `S`는 저장소 세션 타입입니다. 운영 환경에서는 MongoDB `ClientSession`입니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let service = UserService::new(
///     storage,
///     Arc::new(MongoProfileStore::new(&database)),
///     Arc::new(MongoCredentialStore::new(&database, hasher)),
///     Arc::new(LogEventNotifier),
///     config.transaction,
///     config.service,
/// );
///
/// let profile = service.create_user(draft, "secret".to_string()).await?;
/// ```
pub struct UserService<S: Send + 'static> {
    storage: Arc<dyn TransactionalStorage<S>>,
    profiles: Arc<dyn ProfileStore<S>>,
    credentials: Arc<dyn CredentialStore<S>>,
    coordinator: TransactionCoordinator<S>,
    notifier: Arc<dyn EventNotifier>,
    config: ServiceConfig,
}

impl<S: Send + 'static> UserService<S> {
    pub fn new(
        storage: Arc<dyn TransactionalStorage<S>>,
        profiles: Arc<dyn ProfileStore<S>>,
        credentials: Arc<dyn CredentialStore<S>>,
        notifier: Arc<dyn EventNotifier>,
        transaction: TransactionConfig,
        config: ServiceConfig,
    ) -> Self {
        Self {
            coordinator: TransactionCoordinator::new(Arc::clone(&storage), transaction),
            storage,
            profiles,
            credentials,
            notifier,
            config,
        }
    }

    /// 자격 증명과 프로필을 한 트랜잭션으로 생성합니다.
    ///
    /// # Errors
    ///
    /// * `Conflict(email | nickname)` - 유니크 제약 위반. 자격 증명 쓰기도 함께 롤백됩니다.
    /// * `StorageUnavailable` - 저장소 장애 또는 재시도 한도 초과
    pub async fn create_user(&self, draft: ProfileDraft, password: String) -> AppResult<UserProfile> {
        let profiles = Arc::clone(&self.profiles);
        let credentials = Arc::clone(&self.credentials);

        let profile = self
            .coordinator
            .run_atomic(None, move |session: &mut S| {
                let profiles = Arc::clone(&profiles);
                let credentials = Arc::clone(&credentials);
                let draft = draft.clone();
                let password = password.clone();
                async move {
                    credentials
                        .upsert(Some(&mut *session), &draft.email, &password)
                        .await?;
                    profiles.insert(Some(session), &draft).await
                }
                .boxed()
            })
            .await?;

        info!("✅ 사용자 생성 완료: {} ({})", profile.id, profile.email);
        self.notifier.notify(EventKind::Created, &profile.id);
        Ok(profile)
    }

    /// 형식이 잘못된 식별자도 `NotFound`입니다.
    pub async fn get_user(&self, id: &str) -> AppResult<UserProfile> {
        self.profiles.get(None, id).await
    }

    /// 필터와 일치하는 한 페이지와 전체 일치 개수를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `ValidationFailed` - 필터 값 형식 오류 (저장소 호출 전)
    pub async fn list_users(
        &self,
        filter: &ProfileFilter,
        pagination: Pagination,
    ) -> AppResult<(Vec<UserProfile>, u64)> {
        validate_filter(filter)?;

        let total = self.profiles.count(None, filter).await?;
        let users = self.profiles.list(None, filter, pagination).await?;
        Ok((users, total))
    }

    pub async fn count_users(&self, filter: &ProfileFilter) -> AppResult<u64> {
        validate_filter(filter)?;
        self.profiles.count(None, filter).await
    }

    /// 기존 비밀번호를 확인한 뒤 새 비밀번호로 교체합니다.
    ///
    /// 단일 문서 쓰기이므로 트랜잭션을 사용하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 해당 이메일의 자격 증명 없음
    /// * `InvalidCredentials` - 기존 비밀번호 불일치
    pub async fn update_password(&self, email: &str, old_password: &str, new_password: &str) -> AppResult<()> {
        if !self.credentials.verify(None, email, old_password).await? {
            warn!("🔒 비밀번호 변경 거부: {}", email);
            return Err(AppError::InvalidCredentials);
        }

        self.credentials.upsert(None, email, new_password).await?;
        info!("🔑 비밀번호 변경 완료: {}", email);
        Ok(())
    }

    /// 마스크에 포함된 필드만 갱신합니다.
    ///
    /// 이메일이 마스크에 있고 `sync_credential_email`이 켜져 있으면, 프로필 갱신과
    /// 자격 증명 이메일 변경을 한 트랜잭션으로 실행합니다. 꺼져 있으면 자격 증명 행은
    /// 이전 이메일을 유지합니다. 옮길 자격 증명 행이 없으면 경고만 남기고 프로필 갱신은
    /// 그대로 커밋합니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 식별자에 해당하는 프로필 없음
    /// * `Conflict(email | nickname)` - 다른 프로필과 충돌. 저장된 프로필은 변경되지 않습니다.
    pub async fn update_user(&self, id: &str, draft: ProfileDraft, mask: UpdateMask) -> AppResult<UserProfile> {
        let email_masked = mask.contains(ProfileField::Email);

        let profile = if email_masked && self.config.sync_credential_email {
            self.update_user_with_credential(id, draft, &mask).await?
        } else {
            let profile = self.profiles.update_by_mask(None, id, &draft, &mask).await?;
            if email_masked {
                warn!(
                    "Email of user {} changed to {} without updating its credential",
                    profile.id, profile.email
                );
            }
            profile
        };

        info!("✏️ 사용자 수정 완료: {} {:?}", profile.id, mask.fields());
        self.notifier.notify(EventKind::Updated, &profile.id);
        Ok(profile)
    }

    async fn update_user_with_credential(
        &self,
        id: &str,
        draft: ProfileDraft,
        mask: &UpdateMask,
    ) -> AppResult<UserProfile> {
        let mask = mask.clone();
        let profiles = Arc::clone(&self.profiles);
        let credentials = Arc::clone(&self.credentials);
        let id = id.to_string();

        self.coordinator
            .run_atomic(None, move |session: &mut S| {
                let profiles = Arc::clone(&profiles);
                let credentials = Arc::clone(&credentials);
                let id = id.clone();
                let draft = draft.clone();
                let mask = mask.clone();
                async move {
                    let current = profiles.get(Some(&mut *session), &id).await?;
                    let updated = profiles
                        .update_by_mask(Some(&mut *session), &id, &draft, &mask)
                        .await?;
                    if current.email != updated.email {
                        match credentials
                            .rename(Some(session), &current.email, &updated.email)
                            .await
                        {
                            Ok(()) => {}
                            // 짝이 되는 자격 증명이 이미 없으면 프로필 갱신만 반영합니다.
                            Err(AppError::NotFound(_)) => warn!(
                                "No credential for {} while moving user {} to {}",
                                current.email, updated.id, updated.email
                            ),
                            Err(err) => return Err(err),
                        }
                    }
                    Ok(updated)
                }
                .boxed()
            })
            .await
    }

    /// 프로필과 짝이 되는 자격 증명을 한 트랜잭션으로 삭제합니다.
    ///
    /// # Errors
    ///
    /// * `NotFound` - 식별자에 해당하는 프로필 없음 (알림 없음)
    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        let subject = ProfileId::parse(id)
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))?;

        let profiles = Arc::clone(&self.profiles);
        let credentials = Arc::clone(&self.credentials);
        let id = id.to_string();

        let email = self
            .coordinator
            .run_atomic(None, move |session: &mut S| {
                let profiles = Arc::clone(&profiles);
                let credentials = Arc::clone(&credentials);
                let id = id.clone();
                async move {
                    let email = profiles.delete(Some(&mut *session), &id).await?;
                    credentials.delete(Some(session), &email).await?;
                    Ok(email)
                }
                .boxed()
            })
            .await?;

        info!("🗑️ 사용자 삭제 완료: {} ({})", subject, email);
        self.notifier.notify(EventKind::Deleted, &subject);
        Ok(())
    }

    /// 제한 시간 안에 저장소 ping이 성공하는지 확인합니다.
    pub async fn health_check(&self) -> HealthStatus {
        match tokio::time::timeout(self.config.health_timeout, self.storage.ping()).await {
            Ok(Ok(())) => HealthStatus::Healthy,
            Ok(Err(err)) => {
                error!("❌ 저장소 ping 실패: {}", err);
                HealthStatus::Unavailable
            }
            Err(_) => {
                error!("❌ 저장소 ping 시간 초과 ({:?})", self.config.health_timeout);
                HealthStatus::Unavailable
            }
        }
    }
}
