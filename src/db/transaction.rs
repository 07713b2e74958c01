//! # Transaction Coordinator
//!
//! 두 컬렉션(profiles, credentials)에 걸친 작업 단위를 하나의 원자적 트랜잭션으로 실행합니다.
//!
//! ## 동작
//!
//! 1. 호출자가 이미 열린 세션을 넘기면(`Some(session)`) 새 트랜잭션을 중첩하지 않고 그 세션을 재사용합니다.
//! 2. 그렇지 않으면 세션을 시작하고 트랜잭션을 연 뒤 작업을 실행합니다.
//! 3. 작업이 성공하면 커밋, 실패하면 중단(abort)하고 에러를 그대로 전파합니다.
//! 4. `TransientConflict`만 작업 단위 전체를 다시 실행합니다. 도메인 에러는 즉시 반환됩니다.
//! 5. 재시도가 한도를 넘으면 `StorageUnavailable`로 변환합니다.
//!
//! ## 취소
//!
//! `run_atomic`이 반환한 future가 중간에 drop되면 세션도 함께 drop됩니다.
//! MongoDB 드라이버는 진행 중인 트랜잭션을 가진 세션이 drop될 때 트랜잭션을 중단하므로,
//! 취소된 작업의 부분 쓰기는 관찰되지 않습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let profile = coordinator
//!     .run_atomic(None, move |session| {
//!         let profiles = Arc::clone(&profiles);
//!         let draft = draft.clone();
//!         async move { profiles.insert(Some(session), &draft).await }.boxed()
//!     })
//!     .await?;
//! ```
//!
//! 작업 클로저는 재시도 시 여러 번 호출될 수 있으므로, 커밋이 확인되기 전에는
//! 외부로 드러나는 부수 효과(이벤트 알림 등)를 수행해서는 안 됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use log::{debug, warn};

use crate::config::TransactionConfig;
use crate::core::errors::{AppError, AppResult};

/// 세션과 트랜잭션을 제공하는 저장소 경계
///
/// MongoDB 구현은 [`Database`](crate::db::Database)이며, `S`는 `ClientSession`입니다.
#[async_trait]
pub trait TransactionalStorage<S: Send>: Send + Sync {
    async fn start_session(&self) -> AppResult<S>;

    async fn begin(&self, session: &mut S) -> AppResult<()>;

    async fn commit(&self, session: &mut S) -> AppResult<()>;

    async fn abort(&self, session: &mut S) -> AppResult<()>;

    /// 저장소 연결 확인
    async fn ping(&self) -> AppResult<()>;
}

/// 원자적 작업 단위 실행기
pub struct TransactionCoordinator<S: Send> {
    storage: Arc<dyn TransactionalStorage<S>>,
    max_attempts: u32,
}

impl<S: Send> Clone for TransactionCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            max_attempts: self.max_attempts,
        }
    }
}

impl<S: Send> TransactionCoordinator<S> {
    pub fn new(storage: Arc<dyn TransactionalStorage<S>>, config: TransactionConfig) -> Self {
        Self {
            storage,
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// 작업 단위를 원자적으로 실행합니다.
    ///
    /// # Arguments
    ///
    /// * `session` - 호출자가 이미 연 트랜잭션 세션. 있으면 재사용합니다.
    /// * `work` - 세션을 받아 쓰기를 수행하는 작업. 재시도 시 다시 호출됩니다.
    ///
    /// # Errors
    ///
    /// * 작업이 반환한 도메인 에러 (재시도 없음)
    /// * `StorageUnavailable` - 세션 시작 실패 또는 일시적 충돌 재시도 한도 초과
    pub async fn run_atomic<T, F>(&self, session: Option<&mut S>, mut work: F) -> AppResult<T>
    where
        T: Send,
        F: for<'s> FnMut(&'s mut S) -> BoxFuture<'s, AppResult<T>> + Send,
    {
        if let Some(session) = session {
            debug!("Reusing the caller's open transaction");
            return work(session).await;
        }

        let mut session = self.storage.start_session().await?;
        let mut attempt = 1;

        loop {
            match self.attempt(&mut session, &mut work).await {
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        "Retrying transaction (attempt {}/{}): {}",
                        attempt, self.max_attempts, err
                    );
                    attempt += 1;
                }
                Err(err) if err.is_transient() => {
                    return Err(AppError::StorageUnavailable(format!(
                        "transaction retries exhausted after {} attempts: {}",
                        attempt, err
                    )));
                }
                result => {
                    debug!("Transaction finished after {} attempt(s)", attempt);
                    return result;
                }
            }
        }
    }

    async fn attempt<T, F>(&self, session: &mut S, work: &mut F) -> AppResult<T>
    where
        T: Send,
        F: for<'s> FnMut(&'s mut S) -> BoxFuture<'s, AppResult<T>> + Send,
    {
        self.storage.begin(session).await?;

        match work(&mut *session).await {
            Ok(value) => {
                self.storage.commit(session).await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = self.storage.abort(session).await {
                    warn!("Failed to abort transaction: {}", abort_err);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::UniqueField;
    use futures_util::FutureExt;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct CountingStorage {
        sessions: AtomicU32,
        begins: AtomicU32,
        commits: AtomicU32,
        aborts: AtomicU32,
        failing_commits: AtomicU32,
    }

    #[derive(Default)]
    struct FakeSession {
        writes: Vec<u32>,
    }

    #[async_trait]
    impl TransactionalStorage<FakeSession> for CountingStorage {
        async fn start_session(&self) -> AppResult<FakeSession> {
            self.sessions.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession::default())
        }

        async fn begin(&self, session: &mut FakeSession) -> AppResult<()> {
            self.begins.fetch_add(1, Ordering::SeqCst);
            session.writes.clear();
            Ok(())
        }

        async fn commit(&self, _session: &mut FakeSession) -> AppResult<()> {
            let pending = self.failing_commits.load(Ordering::SeqCst);
            if pending > 0 {
                self.failing_commits.store(pending - 1, Ordering::SeqCst);
                return Err(AppError::TransientConflict("write conflict".to_string()));
            }
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn abort(&self, _session: &mut FakeSession) -> AppResult<()> {
            self.aborts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    fn coordinator(storage: &Arc<CountingStorage>, max_attempts: u32) -> TransactionCoordinator<FakeSession> {
        TransactionCoordinator::new(storage.clone(), TransactionConfig { max_attempts })
    }

    #[tokio::test]
    async fn test_commits_successful_work() {
        let storage = Arc::new(CountingStorage::default());
        let result = coordinator(&storage, 3)
            .run_atomic(None, |session: &mut FakeSession| {
                async move {
                    session.writes.push(1);
                    Ok(session.writes.len())
                }
                .boxed()
            })
            .await;

        assert_eq!(result, Ok(1));
        assert_eq!(storage.commits.load(Ordering::SeqCst), 1);
        assert_eq!(storage.aborts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_domain_error_aborts_without_retry() {
        let storage = Arc::new(CountingStorage::default());
        let calls = AtomicU32::new(0);

        let result: AppResult<()> = coordinator(&storage, 5)
            .run_atomic(None, |_session: &mut FakeSession| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::Conflict(UniqueField::Email)) }.boxed()
            })
            .await;

        assert_eq!(result, Err(AppError::Conflict(UniqueField::Email)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(storage.aborts.load(Ordering::SeqCst), 1);
        assert_eq!(storage.commits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transient_work_error_is_retried() {
        let storage = Arc::new(CountingStorage::default());
        let calls = AtomicU32::new(0);

        let result = coordinator(&storage, 5)
            .run_atomic(None, |_session: &mut FakeSession| {
                let call = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if call < 2 {
                        Err(AppError::TransientConflict("write conflict".to_string()))
                    } else {
                        Ok("done")
                    }
                }
                .boxed()
            })
            .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(storage.sessions.load(Ordering::SeqCst), 1);
        assert_eq!(storage.begins.load(Ordering::SeqCst), 3);
        assert_eq!(storage.aborts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_transient_commit_failure_reruns_work() {
        let storage = Arc::new(CountingStorage::default());
        storage.failing_commits.store(1, Ordering::SeqCst);
        let calls = AtomicU32::new(0);

        let result = coordinator(&storage, 3)
            .run_atomic(None, |_session: &mut FakeSession| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(()) }.boxed()
            })
            .await;

        assert_eq!(result, Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(storage.commits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_as_storage_unavailable() {
        let storage = Arc::new(CountingStorage::default());
        let calls = AtomicU32::new(0);

        let result: AppResult<()> = coordinator(&storage, 3)
            .run_atomic(None, |_session: &mut FakeSession| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AppError::TransientConflict("write conflict".to_string())) }.boxed()
            })
            .await;

        assert!(matches!(result, Err(AppError::StorageUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_open_session_is_reused_not_nested() {
        let storage = Arc::new(CountingStorage::default());
        let mut outer = FakeSession::default();

        let result = coordinator(&storage, 3)
            .run_atomic(Some(&mut outer), |session: &mut FakeSession| {
                async move {
                    session.writes.push(7);
                    Ok(())
                }
                .boxed()
            })
            .await;

        assert_eq!(result, Ok(()));
        assert_eq!(outer.writes, vec![7]);
        assert_eq!(storage.sessions.load(Ordering::SeqCst), 0);
        assert_eq!(storage.begins.load(Ordering::SeqCst), 0);
        assert_eq!(storage.commits.load(Ordering::SeqCst), 0);
    }
}
