//! # 토큰 서명 설정
//!
//! HS256 공유 비밀키와 토큰 수명을 정의합니다. 비밀키는 `main`에서 한 번 읽어
//! `TokenService::new`에 넘기며 이후로는 어디서도 다시 읽지 않습니다.
//!
//! ```bash
//! export JWT_SECRET="$(openssl rand -base64 32)"
//! ```

use std::env;

/// 토큰 서명 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 발급 시각부터 만료까지 (초)
    pub const TOKEN_TTL_SECS: i64 = 3600;

    const DEV_SECRET: &'static str = "shop-dev-secret-change-me";

    /// `JWT_SECRET` 값. 비어 있거나 없으면 개발용 키로 대체하고 경고를 남깁니다.
    pub fn secret() -> String {
        match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                log::warn!("JWT_SECRET이 없어 개발용 키를 사용합니다. 운영 환경에서는 반드시 설정하세요");
                Self::DEV_SECRET.to_string()
            }
        }
    }
}
