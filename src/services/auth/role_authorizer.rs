//! 역할 기반 인가
//!
//! 이메일로 현재 사용자를 조회해 요구 역할 집합에 속하는지 판단합니다.
//! 역할은 매 호출마다 저장소에서 새로 읽으며 인가기 내부에 캐시하지 않습니다.
//! 역할 변경은 다음 요청부터 바로 반영됩니다.

use std::sync::Arc;

use crate::core::{AppError, AppResult, RequestContext};
use crate::domain::entities::users::Role;
use crate::repositories::users::UserRepository;

pub struct RoleAuthorizer {
    users: Arc<dyn UserRepository>,
}

impl RoleAuthorizer {
    /// 캐시되지 않은 사용자 저장소를 주입받습니다.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// 사용자의 현재 역할이 `required_roles` 중 하나인지 확인합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - 역할이 집합에 속함
    /// * `Ok(false)` - 사용자는 있지만 역할이 집합 밖
    ///
    /// # Errors
    ///
    /// * `AppError::PrincipalNotFound` - 이메일에 해당하는 사용자가 없음
    /// * 저장소 에러
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        email: &str,
        required_roles: &[Role],
    ) -> AppResult<bool> {
        let user = self
            .users
            .find_by_email(ctx, email)
            .await?
            .ok_or_else(|| AppError::PrincipalNotFound(email.to_string()))?;

        Ok(user.has_any_role(required_roles))
    }
}
