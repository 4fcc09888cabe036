//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인에서 인증/인가를 담당합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 검증 (저장소 호출 없음)
//! - 현재 역할 조회 후 허용 역할 집합과 비교
//! - 클레임, 사용자, 요청 컨텍스트를 request extension에 저장
//!
//! # 사용 방법
//!
//! `RequestGate`를 `app_data`로 등록한 뒤 보호할 스코프에 미들웨어를 붙입니다.
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .app_data(web::Data::new(gate))
//!     .service(
//!         web::scope("/api/v1/orders")
//!             .wrap(AuthMiddleware::required())
//!             .route("", web::get().to(list_my_orders))
//!     )
//!     .service(
//!         web::scope("/api/v1/public")
//!             .route("/status", web::get().to(health_check))
//!     )
//! ```

pub mod auth_middleware;
pub mod request_gate;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
pub use request_gate::RequestGate;
