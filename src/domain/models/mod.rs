//! 도메인 값 객체 모듈
//!
//! 저장소 조회와 부분 업데이트에 쓰이는 값 객체들을 정의합니다.
//!
//! - [`Pagination`] - 1부터 시작하는 페이지 → skip/limit 변환
//! - [`ProfileFilter`] - 비어 있지 않은 필드마다 정확 일치 조건
//! - [`UpdateMask`] - 부분 업데이트가 적용할 필드 목록
//! - [`ProfileField`] - 설정 가능한 프로필 필드와 그 이름들

pub mod fields;
pub mod filter;
pub mod pagination;
pub mod update_mask;

pub use fields::ProfileField;
pub use filter::ProfileFilter;
pub use pagination::{Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use update_mask::UpdateMask;
