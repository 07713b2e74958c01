//! 자격 증명 리포지토리 모듈

pub mod credential_repo;

pub use credential_repo::MongoCredentialStore;
