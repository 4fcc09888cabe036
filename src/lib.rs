//! 쇼핑 서비스 백엔드
//!
//! 사용자, 상품, 주문을 관리하는 REST API 서비스입니다.
//! 의존성은 싱글톤 없이 생성자로 명시적으로 주입됩니다.
//!
//! # Features
//!
//! - **JWT 인증**: HS256 액세스 토큰, 1시간 만료
//! - **역할 기반 인가**: user / seller / admin, 요청마다 저장소에서 현재 역할 확인
//! - **소유권 검사**: 본인 계정, 본인 상품, 본인 주문만 수정/삭제
//! - **연쇄 삭제**: 사용자 삭제 시 상품과 주문, 상품 삭제 시 주문
//! - **MongoDB**: 진실의 원천
//! - **Redis**: 저장소 앞단 cache-aside 데코레이터
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   RequestGate   │ ← 토큰 검증 → 역할 확인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 소유권, 연쇄 삭제
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← Cached* → Mongo*
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use shop_service_backend::repositories::users::{MongoUserRepository, UserRepository};
//! use shop_service_backend::services::auth::TokenService;
//!
//! let users: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(&database));
//! let tokens = Arc::new(TokenService::new(JwtConfig::secret().as_bytes()));
//! let service = UserService::new(users, products, orders, tokens, PasswordConfig::bcrypt_cost());
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub(crate) mod testing;
