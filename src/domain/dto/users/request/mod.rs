pub mod auth_request;
pub mod create_user_request;
pub mod update_user_request;

pub use auth_request::LoginRequest;
pub use create_user_request::CreateUserRequest;
pub use update_user_request::UpdateUserRequest;
