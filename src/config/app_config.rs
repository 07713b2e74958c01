//! 서비스 동작 설정과 전체 애플리케이션 설정 묶음

use std::time::Duration;

use super::data_config::{
    env_or, DatabaseConfig, Environment, PasswordConfig, RateLimitConfig, ServerConfig,
};

/// 트랜잭션 재시도 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionConfig {
    /// 일시적 충돌 시 작업 단위를 실행할 최대 횟수 (최초 시도 포함)
    pub max_attempts: u32,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

/// 사용자 집합체 서비스 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceConfig {
    /// 헬스 체크 ping 제한 시간
    pub health_timeout: Duration,
    /// 부분 업데이트로 이메일이 바뀔 때 자격 증명 행의 이메일도 함께 바꿀지 여부.
    /// 기본값은 기존 동작(변경하지 않음)입니다.
    pub sync_credential_email: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            health_timeout: Duration::from_secs(3),
            sync_credential_email: false,
        }
    }
}

/// 부트스트랩 시점에 한 번 구성되어 각 컴포넌트 생성자로 전달되는 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub password: PasswordConfig,
    pub transaction: TransactionConfig,
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// 환경 변수에서 전체 설정을 읽습니다.
    ///
    /// # Environment Variables
    ///
    /// * `TX_MAX_ATTEMPTS` - 트랜잭션 최대 시도 횟수 (기본값: 5)
    /// * `HEALTH_TIMEOUT_SECS` - 헬스 체크 제한 시간 (기본값: 3)
    /// * `SYNC_CREDENTIAL_EMAIL` - 이메일 변경 시 자격 증명 동기화 (기본값: false)
    ///
    /// 나머지는 [`DatabaseConfig`], [`PasswordConfig`], [`ServerConfig`],
    /// [`RateLimitConfig`]를 참고하세요.
    pub fn from_env() -> Self {
        let environment = Environment::current();
        let password = PasswordConfig::from_env(&environment);

        Self {
            database: DatabaseConfig::from_env(),
            password,
            transaction: TransactionConfig {
                max_attempts: env_or("TX_MAX_ATTEMPTS", 5u32).max(1),
            },
            service: ServiceConfig {
                health_timeout: Duration::from_secs(env_or("HEALTH_TIMEOUT_SECS", 3)),
                sync_credential_email: env_or("SYNC_CREDENTIAL_EMAIL", false),
            },
            server: ServerConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_defaults() {
        let config = ServiceConfig::default();

        assert_eq!(config.health_timeout, Duration::from_secs(3));
        assert!(!config.sync_credential_email);
    }

    #[test]
    fn test_transaction_config_default_attempts() {
        assert_eq!(TransactionConfig::default().max_attempts, 5);
    }
}
