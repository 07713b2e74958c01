//! bcrypt 비밀번호 해셔
//!
//! 해시 계산은 의도적으로 느린 CPU 작업이므로 `spawn_blocking`으로 블로킹 스레드 풀에서 실행합니다.
//! 비교는 `bcrypt::verify`가 상수 시간으로 수행합니다.

use crate::config::PasswordConfig;
use crate::core::errors::{AppResult, ErrorContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(config: &PasswordConfig) -> Self {
        Self { cost: config.bcrypt_cost }
    }

    /// 새 솔트로 해시를 계산합니다. 같은 비밀번호라도 매번 다른 해시가 나옵니다.
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("Password hashing task failed")?
            .context("Failed to hash password")
    }

    /// 저장된 해시와 비교합니다. 불일치는 `Ok(false)`입니다.
    pub async fn verify(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("Password verification task failed")?
            .context("Failed to verify password")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 })
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = hasher();
        let hash = hasher.hash("p1").await.unwrap();

        assert_ne!(hash, "p1");
        assert!(hasher.verify("p1", &hash).await.unwrap());
        assert!(!hasher.verify("p2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hash_is_salted() {
        let hasher = hasher();
        let first = hasher.hash("same").await.unwrap();
        let second = hasher.hash("same").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_an_internal_error() {
        let result = hasher().verify("p1", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(crate::core::errors::AppError::InternalError(_))));
    }
}
