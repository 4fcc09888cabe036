//! 인증/인가 서비스
//!
//! - [`token_service`] - JWT 발급/검증 (HS256, 1시간)
//! - [`role_authorizer`] - 저장소에서 현재 역할을 읽어 요구 역할과 비교

pub mod role_authorizer;
pub mod token_service;

pub use role_authorizer::RoleAuthorizer;
pub use token_service::TokenService;
