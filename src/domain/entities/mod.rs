//! # Entities
//!
//! 사용자, 상품, 주문 엔티티. 엔티티끼리는 포인터가 아닌 ID 문자열로만 참조합니다.
//!
//! ```text
//! User ──< Product (created_by)
//!   │         │
//!   └──< Order >──┘ (user_id, product_id)
//! ```

use chrono::{DateTime, SubsecRound, Utc};

pub mod orders;
pub mod products;
pub mod users;

pub use orders::Order;
pub use products::Product;
pub use users::{Role, User};

/// 엔티티에 찍는 현재 시각. MongoDB `DateTime`과 같은 밀리초 정밀도로 자릅니다.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
