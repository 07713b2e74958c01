use serde::{Deserialize, Serialize};

/// 자격 증명 문서
///
/// 프로필과 같은 이메일을 키로 가지며, 평문이 아닌 솔트가 포함된 bcrypt 해시만 저장합니다.
/// 두 컬렉션 사이에 외래 키는 없으므로 정합성은 서비스 계층이 트랜잭션으로 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
}
