//! # Order HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 권한 |
//! |--------|------|------|------|
//! | `GET` | `/api/v1/orders` | 내 주문 목록 | user, seller, admin |
//! | `GET` | `/api/v1/orders/all` | 전체 주문 목록 | admin |
//! | `POST` | `/api/v1/orders` | 주문 생성 | user, seller, admin |
//! | `GET` | `/api/v1/orders/{id}` | 주문 조회 (주문자만) | user, seller, admin |
//! | `PATCH` | `/api/v1/orders/{id}` | 주문 상품 변경 (주문자만) | user, seller, admin |
//! | `DELETE` | `/api/v1/orders/{id}` | 주문 삭제 (주문자만) | user, seller, admin |
//!
//! `/all`은 `/{id}`보다 먼저 등록해야 합니다.

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::core::{AppError, RequestContext};
use crate::domain::dto::orders::{CreateOrderRequest, UpdateOrderRequest};
use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::orders::OrderService;

#[get("", wrap = "AuthMiddleware::required()")]
pub async fn list_my_orders(
    ctx: RequestContext,
    service: web::Data<OrderService>,
    principal: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let orders = service.get_mine(&ctx, &principal.email).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[get("/all", wrap = "AuthMiddleware::required_with_roles(&[Role::Admin])")]
pub async fn list_all_orders(
    ctx: RequestContext,
    service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let orders = service.get_all(&ctx).await?;
    Ok(HttpResponse::Ok().json(orders))
}

#[post("", wrap = "AuthMiddleware::required()")]
pub async fn create_order(
    ctx: RequestContext,
    service: web::Data<OrderService>,
    principal: AuthenticatedUser,
    payload: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .create(&ctx, payload.into_inner(), &principal.email)
        .await?;
    Ok(HttpResponse::Created().json(order))
}

#[get("/{order_id}", wrap = "AuthMiddleware::required()")]
pub async fn get_order(
    ctx: RequestContext,
    service: web::Data<OrderService>,
    principal: AuthenticatedUser,
    order_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = service.get(&ctx, &order_id, &principal.email).await?;
    Ok(HttpResponse::Ok().json(order))
}

#[patch("/{order_id}", wrap = "AuthMiddleware::required()")]
pub async fn update_order(
    ctx: RequestContext,
    service: web::Data<OrderService>,
    principal: AuthenticatedUser,
    order_id: web::Path<String>,
    payload: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = service
        .edit(&ctx, &order_id, payload.into_inner(), &principal.email)
        .await?;
    Ok(HttpResponse::Ok().json(order))
}

#[delete("/{order_id}", wrap = "AuthMiddleware::required()")]
pub async fn delete_order(
    ctx: RequestContext,
    service: web::Data<OrderService>,
    principal: AuthenticatedUser,
    order_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&ctx, &order_id, &principal.email).await?;
    Ok(HttpResponse::NoContent().finish())
}
