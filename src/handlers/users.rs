//! # User Management HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/v1/users` | 사용자 목록 | 200 OK |
//! | `GET` | `/api/v1/users/{id}` | 사용자 조회 | 200 OK |
//! | `PATCH` | `/api/v1/users/{id}` | 본인 프로필 수정 | 200 OK |
//! | `DELETE` | `/api/v1/users/{id}` | 본인 계정 삭제 (상품/주문 연쇄 삭제) | 204 No Content |
//!
//! 모든 라우트는 인증이 필요합니다 (user, seller, admin).
//! 수정/삭제는 본인 계정에만 허용되며 다른 계정이면 403입니다.

use actix_web::{HttpResponse, delete, get, patch, web};

use crate::core::{AppError, RequestContext};
use crate::domain::dto::users::UpdateUserRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

#[get("")]
pub async fn list_users(
    ctx: RequestContext,
    service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let users = service.get_all(&ctx).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}")]
pub async fn get_user(
    ctx: RequestContext,
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = service.get(&ctx, &user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// 이메일이 바뀌면 응답에 새 `access_token`이 포함됩니다.
#[patch("/{user_id}")]
pub async fn update_user(
    ctx: RequestContext,
    service: web::Data<UserService>,
    principal: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service
        .edit(&ctx, &user_id, payload.into_inner(), &principal.email)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    ctx: RequestContext,
    service: web::Data<UserService>,
    principal: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&ctx, &user_id, &principal.email).await?;
    Ok(HttpResponse::NoContent().finish())
}
