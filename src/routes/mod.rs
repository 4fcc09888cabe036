//! # Route Configuration
//!
//! 모든 HTTP 라우트를 등록합니다. 서비스와 `RequestGate`는 `main`에서
//! `app_data`로 등록되어 있어야 합니다.
//!
//! | 스코프 | 인증 |
//! |--------|------|
//! | `/health` | 공개 |
//! | `/api/v1/auth` | 공개 |
//! | `/api/v1/users` | user, seller, admin |
//! | `/api/v1/products` | 조회 공개, 변경 seller/admin |
//! | `/api/v1/orders` | user, seller, admin (`/all`은 admin) |

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_product_routes(cfg);
    configure_order_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::register_user)
            .service(handlers::auth::register_seller)
            .service(handlers::auth::login),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::list_users)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );
}

// 조회는 공개, 변경 핸들러는 각자 역할 미들웨어를 가짐
fn configure_product_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/products")
            .service(handlers::products::list_products)
            .service(handlers::products::get_product)
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product),
    );
}

fn configure_order_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/orders")
            .service(handlers::orders::list_my_orders)
            .service(handlers::orders::list_all_orders)
            .service(handlers::orders::create_order)
            .service(handlers::orders::get_order)
            .service(handlers::orders::update_order)
            .service(handlers::orders::delete_order),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "shop_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "auth": "JWT HS256"
        }
    }))
}
