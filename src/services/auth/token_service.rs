//! JWT 토큰 발급/검증 서비스
//!
//! HS256 서명의 무상태 액세스 토큰을 발급하고 검증합니다.
//!
//! - 클레임: `{ sub: email, iat, exp }`, `exp = iat + 3600`
//! - 서명 키는 생성 시 주입되며 전역 상태로 두지 않습니다.
//! - 갱신 토큰과 폐기 목록은 없습니다. 재로그인이 새 토큰을 발급하고,
//!   로그아웃은 클라이언트가 토큰을 버리는 것으로 끝납니다.
//!
//! ## 검증 실패 분류
//!
//! | 원인 | 에러 |
//! |------|------|
//! | 서명 불일치, 형식 오류, 만료 | `InvalidToken` |
//! | 서명은 맞지만 클레임을 해석할 수 없음 | `InvalidClaims` |

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};

use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::token::TokenClaims;

/// JWT 토큰 코덱
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// 서명 키로 코덱을 생성합니다.
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let tokens = TokenService::new(JwtConfig::secret().as_bytes());
    /// ```
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// 주체 이메일로 토큰을 발급합니다. 만료는 발급 시점으로부터 정확히 1시간입니다.
    ///
    /// # Errors
    ///
    /// 서명 자체가 실패한 경우에만 `InternalError`를 반환합니다.
    pub fn issue(&self, subject: &str) -> AppResult<String> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    fn issue_at(&self, subject: &str, issued_at: i64) -> AppResult<String> {
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + JwtConfig::TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 토큰을 검증하고 타입이 정해진 클레임을 반환합니다.
    ///
    /// 서명과 만료를 먼저 확인한 뒤 페이로드를 [`TokenClaims`]로 해석합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidToken` - 서명 불일치, 형식 오류, 만료
    /// * `AppError::InvalidClaims` - 필수 클레임 누락, 타입 불일치, 빈 주체
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let data = decode::<serde_json::Value>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::MissingRequiredClaim(claim) => {
                    AppError::InvalidClaims(format!("필수 클레임 누락: {}", claim))
                }
                ErrorKind::InvalidClaimFormat(claim) => {
                    AppError::InvalidClaims(format!("클레임 형식 오류: {}", claim))
                }
                ErrorKind::ExpiredSignature => {
                    AppError::InvalidToken("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::InvalidToken(format!("유효하지 않은 토큰입니다: {}", e)),
            })?;

        let claims: TokenClaims = serde_json::from_value(data.claims)
            .map_err(|e| AppError::InvalidClaims(format!("클레임 해석 실패: {}", e)))?;

        if claims.sub.trim().is_empty() {
            return Err(AppError::InvalidClaims("주체(sub)가 비어 있습니다".to_string()));
        }

        Ok(claims)
    }

    /// `Authorization` 헤더 값에서 Bearer 토큰을 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::InvalidToken(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }

    /// 토큰 유효 기간 (초)
    pub fn expires_in(&self) -> i64 {
        JwtConfig::TOKEN_TTL_SECS
    }
}
