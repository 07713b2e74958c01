//! # 자격 증명 리포지토리 구현
//!
//! `credentials` 컬렉션에 이메일별 bcrypt 해시를 저장합니다.
//!
//! ## 특징
//!
//! - **교체 방식 업서트**: 이메일 문서를 통째로 교체하거나 새로 만듭니다.
//! - **평문 미저장**: 해시는 [`PasswordHasher`]가 새 솔트로 계산합니다.
//! - **멱등 삭제**: 행이 없어도 성공으로 처리합니다.

use async_trait::async_trait;
use log::debug;
use mongodb::bson::doc;
use mongodb::{ClientSession, Collection};

use crate::core::errors::{AppError, AppResult};
use crate::db::{storage_error, with_session, Database, CREDENTIALS_COLLECTION};
use crate::domain::entities::users::Credential;
use crate::repositories::CredentialStore;
use crate::services::password::PasswordHasher;

/// MongoDB 자격 증명 저장소
#[derive(Clone)]
pub struct MongoCredentialStore {
    collection: Collection<Credential>,
    hasher: PasswordHasher,
}

impl MongoCredentialStore {
    pub fn new(database: &Database, hasher: PasswordHasher) -> Self {
        Self {
            collection: database.collection::<Credential>(CREDENTIALS_COLLECTION),
            hasher,
        }
    }
}

#[async_trait]
impl CredentialStore<ClientSession> for MongoCredentialStore {
    async fn upsert(
        &self,
        session: Option<&mut ClientSession>,
        email: &str,
        password: &str,
    ) -> AppResult<()> {
        let credential = Credential {
            email: email.to_string(),
            password_hash: self.hasher.hash(password).await?,
        };

        let result = with_session!(
            self.collection
                .replace_one(doc! { "email": email }, &credential)
                .upsert(true),
            session
        )
        .map_err(storage_error)?;

        debug!(
            "Credential upserted for {} (matched: {}, inserted: {})",
            email,
            result.matched_count,
            result.upserted_id.is_some()
        );
        Ok(())
    }

    async fn verify(
        &self,
        session: Option<&mut ClientSession>,
        email: &str,
        password: &str,
    ) -> AppResult<bool> {
        let credential = with_session!(self.collection.find_one(doc! { "email": email }), session)
            .map_err(storage_error)?
            .ok_or_else(|| AppError::NotFound(format!("no credential for {}", email)))?;

        self.hasher.verify(password, &credential.password_hash).await
    }

    async fn delete(&self, session: Option<&mut ClientSession>, email: &str) -> AppResult<()> {
        let result = with_session!(self.collection.delete_one(doc! { "email": email }), session)
            .map_err(storage_error)?;

        if result.deleted_count == 0 {
            debug!("No credential to delete for {}", email);
        }
        Ok(())
    }

    async fn rename(&self, session: Option<&mut ClientSession>, from: &str, to: &str) -> AppResult<()> {
        let result = with_session!(
            self.collection
                .update_one(doc! { "email": from }, doc! { "$set": { "email": to } }),
            session
        )
        .map_err(storage_error)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("no credential for {}", from)));
        }
        Ok(())
    }
}
