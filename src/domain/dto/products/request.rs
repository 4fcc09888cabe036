//! 상품 요청 DTO
//!
//! 등록자(`created_by`)는 요청 본문에서 받지 않습니다. 본문에 포함되어도 무시되며
//! 서비스가 인증된 사용자로 채웁니다.

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 4, message = "상품명은 최소 4자 이상이어야 합니다"))]
    pub title: String,

    #[validate(range(min = 0.0, message = "가격은 0 이상이어야 합니다"))]
    pub price: f64,

    #[validate(length(min = 12, message = "상품 설명은 최소 12자 이상이어야 합니다"))]
    pub detail: String,
}

/// 상품 부분 수정 요청
///
/// 빈 제목/설명, 누락된 필드, 가격 0은 기존 값을 유지합니다.
/// 병합된 결과는 생성 시와 같은 규칙으로 다시 검증됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub detail: Option<String>,
}

impl UpdateProductRequest {
    /// 실제로 교체할 가격. 0은 "변경 없음".
    pub fn new_price(&self) -> Option<f64> {
        self.price.filter(|p| *p != 0.0)
    }
}
