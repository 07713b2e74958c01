//! Data Transfer Objects
//!
//! HTTP 계층과 코어 사이의 데이터 형태를 정의합니다.
//! 엔티티를 직접 노출하지 않고 DTO로 변환하여 응답합니다.

pub mod users;
