//! 상품 엔티티

use chrono::{DateTime, Utc};

use crate::domain::entities::now_millis;
use serde::{Deserialize, Serialize};

/// 상품 엔티티
///
/// `created_by`에 기록된 사용자만 수정, 삭제할 수 있습니다.
/// 제목은 4자 이상, 설명은 12자 이상이어야 합니다 (서비스 계층에서 검증).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<String>,
    pub title: String,
    pub price: f64,
    pub detail: String,
    /// 등록한 사용자 ID
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(title: String, price: f64, detail: String, created_by: String) -> Self {
        let now = now_millis();

        Self {
            id: None,
            title,
            price,
            detail,
            created_by,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by == user_id
    }
}
