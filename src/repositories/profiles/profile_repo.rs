//! # 프로필 리포지토리 구현
//!
//! `profiles` 컬렉션에 대한 필터 조회, 페이지 목록, 삽입, 마스크 기반 부분 업데이트, 삭제를 담당합니다.
//!
//! ## 저장 형태
//!
//! ```json
//! {
//!   "_id": ObjectId("..."),
//!   "firstName": "John",
//!   "lastName": "Doe",
//!   "nickname": "jd",
//!   "email": "john.doe@gmail.com",
//!   "country": "UK"
//! }
//! ```
//!
//! 닉네임이 없으면 `nickname` 키 자체를 저장하지 않습니다. 부분 유니크 인덱스는 문자열 값에만
//! 적용되므로 닉네임 없는 프로필은 서로 충돌하지 않습니다.
//!
//! ## 순서
//!
//! 목록은 `_id` 오름차순으로 정렬합니다. ObjectId는 생성 시각 순으로 증가하므로
//! 데이터가 바뀌지 않는 한 페이지를 이어 붙이면 모든 문서가 정확히 한 번씩 나옵니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{ClientSession, Collection};
use serde::{Deserialize, Serialize};

use crate::core::errors::{AppError, AppResult};
use crate::db::{storage_error, with_session, Database, PROFILES_COLLECTION};
use crate::domain::entities::users::{ProfileDraft, ProfileId, UserProfile};
use crate::domain::models::{Pagination, ProfileField, ProfileFilter, UpdateMask};
use crate::repositories::ProfileStore;

/// `profiles` 컬렉션의 문서 형태
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    first_name: String,
    last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nickname: Option<String>,
    email: String,
    country: String,
}

impl From<&UserProfile> for ProfileDocument {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.as_object_id(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            nickname: profile.nickname.clone(),
            email: profile.email.clone(),
            country: profile.country.clone(),
        }
    }
}

impl From<ProfileDocument> for UserProfile {
    fn from(document: ProfileDocument) -> Self {
        Self {
            id: ProfileId::from(document.id),
            first_name: document.first_name,
            last_name: document.last_name,
            nickname: document.nickname,
            email: document.email,
            country: document.country,
        }
    }
}

/// 필터의 비어 있지 않은 필드마다 정확 일치 조건을 만듭니다.
fn filter_document(filter: &ProfileFilter) -> Document {
    filter
        .predicates()
        .into_iter()
        .map(|(field, value)| (field.storage_key().to_string(), Bson::from(value)))
        .collect()
}

/// 마스크에 포함된 필드만으로 `$set` / `$unset` 업데이트를 만듭니다.
///
/// 닉네임을 마스크에 넣고 값을 비우면 닉네임이 제거됩니다.
fn update_document(draft: &ProfileDraft, mask: &UpdateMask) -> Document {
    let mut set = Document::new();
    let mut unset = Document::new();

    for field in mask.fields() {
        match field.draft_value_of(draft).filter(|value| !value.is_empty()) {
            Some(value) => {
                set.insert(field.storage_key(), value);
            }
            None if *field == ProfileField::Nickname => {
                unset.insert(field.storage_key(), "");
            }
            None => {
                set.insert(field.storage_key(), "");
            }
        }
    }

    let mut update = Document::new();
    if !set.is_empty() {
        update.insert("$set", set);
    }
    if !unset.is_empty() {
        update.insert("$unset", unset);
    }
    update
}

fn parse_id(id: &str) -> AppResult<ProfileId> {
    ProfileId::parse(id).ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
}

/// MongoDB 프로필 저장소
#[derive(Clone)]
pub struct MongoProfileStore {
    collection: Collection<ProfileDocument>,
}

impl MongoProfileStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<ProfileDocument>(PROFILES_COLLECTION),
        }
    }
}

#[async_trait]
impl ProfileStore<ClientSession> for MongoProfileStore {
    async fn count(&self, session: Option<&mut ClientSession>, filter: &ProfileFilter) -> AppResult<u64> {
        with_session!(self.collection.count_documents(filter_document(filter)), session)
            .map_err(storage_error)
    }

    async fn list(
        &self,
        session: Option<&mut ClientSession>,
        filter: &ProfileFilter,
        pagination: Pagination,
    ) -> AppResult<Vec<UserProfile>> {
        let limit = i64::try_from(pagination.limit()).unwrap_or(i64::MAX);
        let find = self
            .collection
            .find(filter_document(filter))
            .sort(doc! { "_id": 1 })
            .skip(pagination.skip())
            .limit(limit);

        let documents: Vec<ProfileDocument> = match session {
            Some(session) => {
                let mut cursor = find.session(&mut *session).await.map_err(storage_error)?;
                cursor.stream(session).try_collect().await.map_err(storage_error)?
            }
            None => find
                .await
                .map_err(storage_error)?
                .try_collect()
                .await
                .map_err(storage_error)?,
        };

        debug!(
            "Listed {} profile(s) (page {}, size {})",
            documents.len(),
            pagination.page(),
            pagination.page_size()
        );
        Ok(documents.into_iter().map(UserProfile::from).collect())
    }

    async fn get(&self, session: Option<&mut ClientSession>, id: &str) -> AppResult<UserProfile> {
        let id = parse_id(id)?;

        with_session!(
            self.collection.find_one(doc! { "_id": id.as_object_id() }),
            session
        )
        .map_err(storage_error)?
        .map(UserProfile::from)
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }

    async fn insert(&self, session: Option<&mut ClientSession>, draft: &ProfileDraft) -> AppResult<UserProfile> {
        let profile = UserProfile::from_draft(ProfileId::generate(), draft);
        let document = ProfileDocument::from(&profile);

        with_session!(self.collection.insert_one(&document), session).map_err(storage_error)?;

        debug!("Profile inserted: {}", profile.id);
        Ok(profile)
    }

    async fn update_by_mask(
        &self,
        session: Option<&mut ClientSession>,
        id: &str,
        draft: &ProfileDraft,
        mask: &UpdateMask,
    ) -> AppResult<UserProfile> {
        let id = parse_id(id)?;

        with_session!(
            self.collection
                .find_one_and_update(doc! { "_id": id.as_object_id() }, update_document(draft, mask))
                .return_document(ReturnDocument::After),
            session
        )
        .map_err(storage_error)?
        .map(UserProfile::from)
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }

    async fn delete(&self, session: Option<&mut ClientSession>, id: &str) -> AppResult<String> {
        let id = parse_id(id)?;

        with_session!(
            self.collection.find_one_and_delete(doc! { "_id": id.as_object_id() }),
            session
        )
        .map_err(storage_error)?
        .map(|document| document.email)
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_document_uses_storage_keys() {
        let filter = ProfileFilter {
            first_name: Some("John".to_string()),
            country: Some("UK".to_string()),
            email: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(filter_document(&filter), doc! { "firstName": "John", "country": "UK" });
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert_eq!(filter_document(&ProfileFilter::default()), Document::new());
    }

    #[test]
    fn test_update_document_touches_only_masked_fields() {
        let draft = ProfileDraft {
            first_name: "Jane".to_string(),
            last_name: "Other".to_string(),
            email: "jane@x.com".to_string(),
            ..Default::default()
        };
        let mask = UpdateMask::parse(&["first_name", "email"]).unwrap();

        assert_eq!(
            update_document(&draft, &mask),
            doc! { "$set": { "firstName": "Jane", "email": "jane@x.com" } }
        );
    }

    #[test]
    fn test_masked_empty_nickname_is_unset() {
        let draft = ProfileDraft { nickname: None, ..Default::default() };
        let mask = UpdateMask::parse(&["nickname"]).unwrap();

        assert_eq!(update_document(&draft, &mask), doc! { "$unset": { "nickname": "" } });
    }

    #[test]
    fn test_document_round_trip_keeps_camel_case_keys() {
        let profile = UserProfile {
            id: ProfileId::generate(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            nickname: None,
            email: "john.doe@gmail.com".to_string(),
            country: "UK".to_string(),
        };

        let bson = mongodb::bson::to_document(&ProfileDocument::from(&profile)).unwrap();
        assert!(bson.contains_key("firstName"));
        assert!(bson.contains_key("_id"));
        assert!(!bson.contains_key("nickname"));

        let decoded: ProfileDocument = mongodb::bson::from_document(bson).unwrap();
        assert_eq!(UserProfile::from(decoded), profile);
    }
}
