//! 2단계 요청 게이트
//!
//! 1. 인증: `Authorization: Bearer <token>` 헤더를 검증해 클레임을 얻습니다.
//!    저장소를 전혀 호출하지 않습니다.
//! 2. 인가: 클레임의 이메일로 현재 역할을 조회해 허용 역할 집합과 비교합니다.
//!
//! 1단계가 실패하면 2단계는 실행되지 않습니다.

use std::sync::Arc;

use crate::core::{AppError, AppResult, RequestContext};
use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenClaims;
use crate::services::auth::{RoleAuthorizer, TokenService};

pub struct RequestGate {
    tokens: Arc<TokenService>,
    authorizer: Arc<RoleAuthorizer>,
}

impl RequestGate {
    pub fn new(tokens: Arc<TokenService>, authorizer: Arc<RoleAuthorizer>) -> Self {
        Self { tokens, authorizer }
    }

    /// 인증 헤더를 검증합니다.
    ///
    /// # Errors
    ///
    /// 헤더 누락, Bearer 형식 오류, 토큰 검증 실패 시 `InvalidToken` 또는 `InvalidClaims`
    pub fn authenticate(&self, auth_header: Option<&str>) -> AppResult<TokenClaims> {
        let header = auth_header
            .ok_or_else(|| AppError::InvalidToken("Authorization 헤더가 없습니다".to_string()))?;

        let token = self.tokens.extract_bearer_token(header)?;
        self.tokens.verify(token)
    }

    /// 클레임의 주체가 허용 역할을 가졌는지 확인합니다.
    ///
    /// # Errors
    ///
    /// * `PrincipalNotFound` - 토큰은 유효하지만 사용자가 사라짐
    /// * `Forbidden` - 역할이 허용 집합 밖
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        claims: &TokenClaims,
        allowed_roles: &[Role],
    ) -> AppResult<AuthenticatedUser> {
        let allowed = self
            .authorizer
            .authorize(ctx, claims.email(), allowed_roles)
            .await?;

        if !allowed {
            return Err(AppError::Forbidden(format!(
                "허용되지 않은 역할입니다 (필요: {:?})",
                allowed_roles
            )));
        }

        Ok(AuthenticatedUser::new(claims.email()))
    }
}
