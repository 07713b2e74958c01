//! 사용자 API DTO 모듈
//!
//! - [`request`] - 생성, 부분 업데이트, 비밀번호 변경, 목록 조회 요청
//! - [`response`] - 사용자, 목록, 헬스 체크 응답

pub mod request;
pub mod response;
