//! 소유권 검사 공통 절차
//!
//! 변경/삭제 요청은 항상 같은 순서로 검사합니다.
//!
//! 1. 인증된 이메일로 행위자 조회 → 없으면 `PrincipalNotFound`
//! 2. 대상 엔티티 조회 → 없으면 `NotFound`
//! 3. 대상의 소유자 필드와 행위자 ID 비교 → 다르면 `Forbidden`
//!
//! 관리자 역할도 같은 검사를 받습니다.
//!
//! 검사와 변경 사이에는 잠금이 없으므로 두 단계는 원자적이지 않습니다.

use crate::core::{AppError, AppResult, RequestContext};
use crate::domain::entities::users::User;
use crate::repositories::users::UserRepository;

/// 행위자와 그 ID
pub struct Principal {
    pub id: String,
    pub user: User,
}

/// 인증된 이메일로 행위자를 조회합니다.
pub async fn resolve_principal(
    users: &dyn UserRepository,
    ctx: &RequestContext,
    email: &str,
) -> AppResult<Principal> {
    let user = users
        .find_by_email(ctx, email)
        .await?
        .ok_or_else(|| AppError::PrincipalNotFound(email.to_string()))?;

    let id = user
        .id
        .clone()
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

    Ok(Principal { id, user })
}

/// 소유자 ID가 행위자 ID와 같은지 확인합니다.
pub fn ensure_owner(principal: &Principal, owner_id: &str, resource: &str) -> AppResult<()> {
    if principal.id == owner_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "{}에 대한 권한이 없습니다",
            resource
        )))
    }
}
