//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 사용자, 상품, 주문 (저장소와 캐시가 공유)
//! ├── DTOs      - HTTP 요청/응답 계약
//! └── Models    - 토큰 클레임, 인증된 주체 (요청 범위)
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Cache, DB)
//! ```
//!
//! 엔티티는 저장 형식(ObjectId, BSON DateTime)을 알지 못합니다.
//! MongoDB 문서 매핑은 각 리포지토리의 내부 문서 타입이 담당합니다.

pub mod dto;
pub mod entities;
pub mod models;
