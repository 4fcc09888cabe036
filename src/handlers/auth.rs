//! # Authentication HTTP Handlers
//!
//! 가입과 로그인 엔드포인트입니다. 모두 공개 라우트이며 성공 시 액세스 토큰을 발급합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/auth/register` | 일반 사용자 가입 | 201 Created |
//! | `POST` | `/api/v1/auth/register/seller` | 판매자 가입 | 201 Created |
//! | `POST` | `/api/v1/auth/login` | 이메일/비밀번호 로그인 | 200 OK |
//!
//! 로그인 실패는 원인(알 수 없는 이메일, 비밀번호 불일치)과 무관하게 같은 401로 응답합니다.

use actix_web::{HttpResponse, post, web};

use crate::core::{AppError, RequestContext};
use crate::domain::dto::users::{CreateUserRequest, LoginRequest};
use crate::domain::entities::users::Role;
use crate::services::users::UserService;

#[post("/register")]
pub async fn register_user(
    ctx: RequestContext,
    service: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.register(&ctx, payload.into_inner(), Role::User).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/register/seller")]
pub async fn register_seller(
    ctx: RequestContext,
    service: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service
        .register(&ctx, payload.into_inner(), Role::Seller)
        .await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    ctx: RequestContext,
    service: web::Data<UserService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = payload.email.clone();

    let response = service.login(&ctx, payload.into_inner()).await.map_err(|e| {
        if e.is_unauthorized() {
            log::warn!("로그인 실패 - 사용자: {}, 원인: {}", email, e);
        }
        e
    })?;

    log::info!("로그인 성공 - 사용자: {}", email);
    Ok(HttpResponse::Ok().json(response))
}
