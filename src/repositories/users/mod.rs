pub mod cached_user_repo;
pub mod user_repo;

pub use cached_user_repo::CachedUserRepository;
pub use user_repo::{MongoUserRepository, UserRepository};
