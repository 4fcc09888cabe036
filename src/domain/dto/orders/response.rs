use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::orders::Order;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.unwrap_or_default(),
            user_id: order.user_id,
            product_id: order.product_id,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
