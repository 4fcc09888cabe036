pub mod cached_product_repo;
pub mod product_repo;

pub use cached_product_repo::CachedProductRepository;
pub use product_repo::{MongoProductRepository, ProductRepository};
