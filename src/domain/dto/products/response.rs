use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::products::Product;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub detail: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.unwrap_or_default(),
            title: product.title,
            price: product.price,
            detail: product.detail,
            created_by: product.created_by,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
