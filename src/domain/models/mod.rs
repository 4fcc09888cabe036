//! 요청 처리 중에만 존재하는 모델 (저장되지 않음)

pub mod auth;
pub mod token;

pub use auth::AuthenticatedUser;
pub use token::TokenClaims;
