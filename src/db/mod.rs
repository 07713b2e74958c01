//! Database Connection Management Module
//!
//! MongoDB 연결, 인덱스 생성, 세션/트랜잭션 제어를 담당하는 모듈입니다.
//!
//! # 컬렉션
//!
//! | 컬렉션 | 내용 | 인덱스 |
//! |--------|------|--------|
//! | `profiles` | 사용자 프로필 | `email_unique`, `nickname_unique` (문자열일 때만) |
//! | `credentials` | 이메일 + bcrypt 해시 | `email_unique` |
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::connect(&config.database).await?;
//! database.create_indexes().await?;
//! ```

pub mod errors;
pub mod transaction;

use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use mongodb::bson::{doc, Document};
use mongodb::error::UNKNOWN_TRANSACTION_COMMIT_RESULT;
use mongodb::options::{ClientOptions, IndexOptions, ReadConcern, WriteConcern};
use mongodb::{Client, ClientSession, Collection, IndexModel};

use crate::config::DatabaseConfig;
use crate::core::errors::{AppError, AppResult};

pub use errors::storage_error;
pub use transaction::{TransactionCoordinator, TransactionalStorage};

pub const PROFILES_COLLECTION: &str = "profiles";
pub const CREDENTIALS_COLLECTION: &str = "credentials";

/// 선택적 세션으로 드라이버 액션을 실행합니다.
///
/// 세션이 있으면 그 트랜잭션 안에서, 없으면 단독으로 실행합니다.
macro_rules! with_session {
    ($action:expr, $session:expr) => {
        match $session {
            Some(session) => $action.session(session).await,
            None => $action.await,
        }
    };
}

pub(crate) use with_session;

/// 커밋 결과를 알 수 없을 때 커밋만 다시 시도하는 횟수
const COMMIT_RETRY_LIMIT: u32 = 3;

/// MongoDB 데이터베이스 연결 래퍼
///
/// 클라이언트는 내부적으로 연결 풀을 가지므로 복제해서 공유해도 됩니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 새 MongoDB 연결을 만들고 `ping`으로 연결 상태를 검증합니다.
    ///
    /// ## 사용 예제
    /// ```rust,ignore
    /// let database = Database::connect(&DatabaseConfig::from_env()).await?;
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(storage_error)?;
        client_options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(client_options).map_err(storage_error)?;

        let database = Self {
            client,
            database_name: config.database_name.clone(),
        };
        database.ping().await?;

        info!("✅ MongoDB 연결 성공: {}", database.database_name);
        Ok(database)
    }

    /// 실제 MongoDB 작업을 위한 `mongodb::Database` 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.get_database().collection::<T>(name)
    }

    /// 두 컬렉션의 유니크 인덱스를 생성합니다.
    ///
    /// 닉네임 인덱스는 값이 문자열인 문서에만 적용되므로, 닉네임이 없는 프로필은
    /// 몇 개든 공존할 수 있습니다. 이미 같은 정의의 인덱스가 있으면 아무 일도 일어나지 않습니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = || {
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(errors::EMAIL_INDEX.to_string())
                        .build(),
                )
                .build()
        };

        let nickname_index = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(errors::NICKNAME_INDEX.to_string())
                    .partial_filter_expression(doc! { "nickname": { "$type": "string" } })
                    .build(),
            )
            .build();

        let profiles = self.collection::<Document>(PROFILES_COLLECTION);
        profiles
            .create_index(email_index())
            .await
            .map_err(storage_error)?;
        profiles
            .create_index(nickname_index)
            .await
            .map_err(storage_error)?;

        self.collection::<Document>(CREDENTIALS_COLLECTION)
            .create_index(email_index())
            .await
            .map_err(storage_error)?;

        info!("📇 인덱스 준비 완료: {}.{{{}, {}}}", self.database_name, PROFILES_COLLECTION, CREDENTIALS_COLLECTION);
        Ok(())
    }
}

#[async_trait]
impl TransactionalStorage<ClientSession> for Database {
    async fn start_session(&self) -> AppResult<ClientSession> {
        self.client.start_session().await.map_err(storage_error)
    }

    /// 스냅샷 읽기 + 과반수 쓰기 확인으로 트랜잭션을 엽니다.
    async fn begin(&self, session: &mut ClientSession) -> AppResult<()> {
        session
            .start_transaction()
            .read_concern(ReadConcern::snapshot())
            .write_concern(WriteConcern::majority())
            .await
            .map_err(storage_error)
    }

    async fn commit(&self, session: &mut ClientSession) -> AppResult<()> {
        let mut retries = 0;
        loop {
            match session.commit_transaction().await {
                Ok(()) => return Ok(()),
                Err(err)
                    if err.contains_label(UNKNOWN_TRANSACTION_COMMIT_RESULT)
                        && retries < COMMIT_RETRY_LIMIT =>
                {
                    retries += 1;
                    warn!("Commit result unknown, retrying commit ({}/{}): {}", retries, COMMIT_RETRY_LIMIT, err);
                    tokio::time::sleep(Duration::from_millis(50 * u64::from(retries))).await;
                }
                Err(err) => return Err(storage_error(err)),
            }
        }
    }

    async fn abort(&self, session: &mut ClientSession) -> AppResult<()> {
        session.abort_transaction().await.map_err(storage_error)
    }

    async fn ping(&self) -> AppResult<()> {
        self.get_database()
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| AppError::StorageUnavailable(err.to_string()))
    }
}
