pub mod request;
pub mod response;

pub use request::{CreateOrderRequest, UpdateOrderRequest};
pub use response::OrderResponse;
