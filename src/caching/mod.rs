//! # Caching Module
//!
//! 리포지토리 앞단 캐시 계층이 사용하는 키-값 저장소입니다.
//!
//! - [`cache_store`] - `CacheStore` 트레이트 (문자열 get/set/del)
//! - [`redis`] - Redis `ConnectionManager` 기반 구현체
//!
//! 캐시는 항상 파생 데이터입니다. 비워지거나 유실되어도 데이터 손실은 없으며
//! 콜드 캐시로 인한 성능 저하만 발생합니다.

pub mod cache_store;
pub mod redis;

pub use self::cache_store::CacheStore;
pub use self::redis::RedisClient;
