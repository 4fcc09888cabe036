//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 전역 싱글톤 없이 생성자로 저장소와 토큰 코덱을 주입받습니다.
//! `main`에서 한 번 조립한 뒤 `web::Data`로 핸들러에 공유됩니다.
//!
//! # Features
//!
//! - 사용자 가입, 로그인, 프로필 관리
//! - 상품/주문 CRUD와 소유권 검사
//! - 사용자/상품 삭제 시 연쇄 삭제
//! - JWT 토큰 발급/검증과 역할 기반 인가
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, users::UserService};
//!
//! let tokens = Arc::new(TokenService::new(JwtConfig::secret().as_bytes()));
//! let user_service = UserService::new(users, products, orders, tokens, PasswordConfig::bcrypt_cost());
//! ```

pub mod auth;
pub mod orders;
pub mod ownership;
pub mod products;
pub mod users;
