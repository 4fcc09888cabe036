//! # Product HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 권한 |
//! |--------|------|------|------|
//! | `GET` | `/api/v1/products` | 상품 목록 | 공개 |
//! | `GET` | `/api/v1/products/{id}` | 상품 조회 | 공개 |
//! | `POST` | `/api/v1/products` | 상품 등록 | seller, admin |
//! | `PATCH` | `/api/v1/products/{id}` | 상품 수정 (등록자만) | seller, admin |
//! | `DELETE` | `/api/v1/products/{id}` | 상품 삭제 (주문 연쇄 삭제) | seller, admin |

use actix_web::{HttpResponse, delete, get, patch, post, web};

use crate::core::{AppError, RequestContext};
use crate::domain::dto::products::{CreateProductRequest, UpdateProductRequest};
use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::products::ProductService;

#[get("")]
pub async fn list_products(
    ctx: RequestContext,
    service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let products = service.get_all(&ctx).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/{product_id}")]
pub async fn get_product(
    ctx: RequestContext,
    service: web::Data<ProductService>,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = service.get(&ctx, &product_id).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[post(
    "",
    wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])"
)]
pub async fn create_product(
    ctx: RequestContext,
    service: web::Data<ProductService>,
    principal: AuthenticatedUser,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service
        .create(&ctx, payload.into_inner(), &principal.email)
        .await?;
    Ok(HttpResponse::Created().json(product))
}

#[patch(
    "/{product_id}",
    wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])"
)]
pub async fn update_product(
    ctx: RequestContext,
    service: web::Data<ProductService>,
    principal: AuthenticatedUser,
    product_id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = service
        .edit(&ctx, &product_id, payload.into_inner(), &principal.email)
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete(
    "/{product_id}",
    wrap = "AuthMiddleware::required_with_roles(&[Role::Seller, Role::Admin])"
)]
pub async fn delete_product(
    ctx: RequestContext,
    service: web::Data<ProductService>,
    principal: AuthenticatedUser,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&ctx, &product_id, &principal.email).await?;
    Ok(HttpResponse::NoContent().finish())
}
