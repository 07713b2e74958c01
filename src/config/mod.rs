//! # Configuration Module
//!
//! 서비스 설정 관리를 담당하는 모듈입니다.
//! 환경 변수는 부트스트랩 시점에 [`AppConfig::from_env`]로 한 번만 읽히고,
//! 이후에는 각 컴포넌트 생성자에 값으로 전달됩니다. 전역 설정 객체는 두지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경, 비밀번호 해싱 설정
//! - [`app_config`] - 트랜잭션 재시도, 서비스 동작, 전체 설정 묶음
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//! export DATABASE_NAME="usersvcdb"
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! export TX_MAX_ATTEMPTS="5"
//! export HEALTH_TIMEOUT_SECS="3"
//! ```
//!
//! MongoDB 트랜잭션은 레플리카 셋 또는 샤드 클러스터에서만 동작합니다.

pub mod data_config;
pub mod app_config;

pub use data_config::*;
pub use app_config::*;
