//! JWT 클레임 구조체
//!
//! 검증 시점에 한 번만 타입이 정해지는 클레임 집합입니다.
//! 이후 단계는 문자열 맵을 다시 캐스팅하지 않고 이름 있는 필드만 읽습니다.
use serde::{Deserialize, Serialize};

/// HS256 토큰 클레임
///
/// 저장되지 않으며 서명된 토큰 안에서만 존재합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 주체 이메일
    pub sub: String,
    /// 발급 시각 (unix seconds)
    pub iat: i64,
    /// 만료 시각 (unix seconds), `iat + 3600`
    pub exp: i64,
}

impl TokenClaims {
    pub fn email(&self) -> &str {
        &self.sub
    }
}
