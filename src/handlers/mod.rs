//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Middlewares - 토큰 검증, 역할 확인             ← Gate
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리        ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 소유권 검사, 연쇄 삭제               ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 캐시 데코레이터 + MongoDB       ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 서비스를 `web::Data`로 주입받고, 인증된 사용자는
//! [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser) 추출자로 받습니다.
//! 에러는 `AppError`의 `ResponseError` 구현이 HTTP 응답으로 변환합니다.
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 가입, 로그인
//! - [`users`] - 사용자 조회/수정/삭제
//! - [`products`] - 상품 CRUD
//! - [`orders`] - 주문 CRUD

pub mod auth;
pub mod orders;
pub mod products;
pub mod users;
