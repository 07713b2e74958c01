//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 실행 환경 및 비밀번호 해싱 관련 설정을 관리합니다.
//! 모든 값은 부트스트랩 시점에 한 번 읽혀 명시적인 구조체로 전달됩니다.

use std::env;
use std::str::FromStr;

use log::warn;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::parse(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 환경 변수를 읽어 파싱합니다. 없거나 파싱에 실패하면 기본값을 사용합니다.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or_else(|e| {
            warn!("{} 파싱 실패: {}. 기본값 사용", key, e);
            default
        }),
        Err(_) => default,
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// MongoDB 연결 URI
    pub uri: String,
    /// 사용할 데이터베이스 이름
    pub database_name: String,
    /// 모니터링에 표시될 애플리케이션 이름
    pub app_name: String,
}

impl DatabaseConfig {
    /// ## 환경 변수
    /// - `MONGODB_URI` (기본값: "mongodb://localhost:27017")
    /// - `DATABASE_NAME` (기본값: "usersvcdb")
    pub fn from_env() -> Self {
        Self {
            uri: env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "usersvcdb".to_string()),
            app_name: "usersvc".to_string(),
        }
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PasswordConfig {
    /// bcrypt work factor (4-15)
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// `BCRYPT_COST`가 유효 범위(4-15)이면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn from_env(environment: &Environment) -> Self {
        let bcrypt_cost = env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(environment));

        Self { bcrypt_cost }
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: bcrypt::DEFAULT_COST }
    }
}

/// 서버 바인딩 설정
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS 허용 출처 목록
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// `HOST` (기본값 "0.0.0.0"), `PORT` (기본값 8080),
    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분, 기본값 "http://localhost:3000")
    pub fn from_env() -> Self {
        let origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            allowed_origins: parse_origins(&origins),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rate Limiting 설정
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND` (기본값 100), `RATE_LIMIT_BURST_SIZE` (기본값 200)
    pub fn from_env() -> Self {
        Self {
            per_second: env_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: env_or("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}
