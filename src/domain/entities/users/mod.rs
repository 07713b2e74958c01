//! Users Entity Module
//!
//! 사용자 집합체(프로필 + 자격 증명)를 구성하는 엔티티들을 정의하는 모듈입니다.
//!
//! # 주요 구성 요소
//!
//! - [`profile::UserProfile`] - `profiles` 컬렉션에 저장되는 프로필
//! - [`credential::Credential`] - `credentials` 컬렉션에 저장되는 비밀번호 해시
//!
//! 두 레코드는 이메일로 연결되며, 생성/삭제는 하나의 트랜잭션 안에서 함께 이루어집니다.

pub mod profile;
pub mod credential;

pub use credential::Credential;
pub use profile::{ProfileDraft, ProfileId, UserProfile};
