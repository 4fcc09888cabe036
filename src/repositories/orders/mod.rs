pub mod cached_order_repo;
pub mod order_repo;

pub use cached_order_repo::CachedOrderRepository;
pub use order_repo::{MongoOrderRepository, OrderRepository};
