//! 사용자 관리 서비스 모듈
//!
//! 가입, 로그인, 프로필 수정, 연쇄 삭제를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일 중복 방지
//! - 본인 계정만 수정/삭제
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let auth = user_service.register(&ctx, request, Role::User).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
