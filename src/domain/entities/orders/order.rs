//! 주문 엔티티

use chrono::{DateTime, Utc};

use crate::domain::entities::now_millis;
use serde::{Deserialize, Serialize};

/// 주문 엔티티
///
/// 생성 후 변경 가능한 필드는 `product_id`뿐이며 `user_id`는 고정됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    /// 주문한 사용자 ID
    pub user_id: String,
    pub product_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(user_id: String, product_id: String) -> Self {
        let now = now_millis();

        Self {
            id: None,
            user_id,
            product_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
