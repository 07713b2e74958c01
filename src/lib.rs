//! 사용자 계정 서비스 백엔드
//!
//! 사용자 프로필과 자격 증명을 서로 다른 MongoDB 컬렉션에 저장하면서,
//! 두 레코드가 항상 짝을 이루도록 트랜잭션으로 일관성을 유지하는 서비스입니다.
//!
//! # Features
//!
//! - **계정 생명주기**: 생성, 조회, 필터 + 페이지 목록, 마스크 기반 부분 수정, 삭제
//! - **비밀번호 관리**: bcrypt 해시 저장, 기존 비밀번호 확인 후 교체
//! - **유니크 제약**: 이메일, 닉네임(값이 있을 때만) 중복을 `Conflict`로 변환
//! - **트랜잭션 재시도**: 일시적 충돌은 작업 단위 전체를 자동 재실행
//! - **변경 이벤트**: 커밋 이후에만 생성/수정/삭제 알림
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   Routes/Handlers    │ ← REST API, 입력 검증, 상태 코드
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │     UserService      │ ← 계정 단위 오케스트레이션, 이벤트 알림
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │TransactionCoordinator│ ← 원자적 작업 단위, 재시도
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ Profile/Credential   │ ← 컬렉션별 저장소
//! │       Stores         │
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │       MongoDB        │
//! └──────────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod events;
pub mod repositories;
pub mod services;
pub mod routes;
pub mod handlers;
