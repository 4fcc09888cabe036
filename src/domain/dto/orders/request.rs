//! 주문 요청 DTO
//!
//! 주문자(`user_id`)는 요청 본문에서 받지 않으며 인증된 사용자로 채워집니다.

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "상품 ID가 필요합니다"))]
    pub product_id: String,
}

/// 주문 수정 요청. 변경 가능한 필드는 상품뿐이며 비어 있으면 기존 상품을 유지합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub product_id: Option<String>,
}
