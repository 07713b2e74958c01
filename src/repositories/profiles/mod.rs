//! 프로필 리포지토리 모듈

pub mod profile_repo;

pub use profile_repo::MongoProfileStore;
