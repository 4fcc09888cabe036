//! # Data Transfer Objects
//!
//! HTTP 요청/응답 계약. 요청 DTO는 `validator`로 검증되고,
//! 응답 DTO는 엔티티에서 `From`으로 변환됩니다. 비밀번호 해시는 응답에 포함되지 않습니다.

pub mod orders;
pub mod products;
pub mod users;

pub use orders::*;
pub use products::*;
pub use users::*;
