//! # Repository Layer
//!
//! 엔티티별 저장소 계약과 두 가지 구현을 제공합니다.
//!
//! ```text
//! Service ──> Cached*Repository (cache-aside 데코레이터)
//!                 │  같은 트레이트 구현, 합성으로 감쌈
//!                 ▼
//!             Mongo*Repository (진실의 원천)
//! ```
//!
//! 캐시 데코레이터는 `Arc<dyn *Repository>`와 [`CacheAside`]를 생성자로 받습니다.
//! 캐시를 끄면 서비스는 Mongo 구현체를 직접 받습니다.

pub mod cache_aside;
pub mod mongo;
pub mod orders;
pub mod products;
pub mod users;

pub use cache_aside::CacheAside;
