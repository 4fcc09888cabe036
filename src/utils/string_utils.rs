//! # 문자열 유틸리티
//!
//! 요청 DTO의 부분 수정 필드 처리에 쓰는 공통 함수들입니다.
//!
//! 부분 수정 요청에서 빈 문자열, 공백 문자열, `null`, 누락된 필드는 모두
//! "변경 없음"(`None`)으로 정규화됩니다.

use serde::Deserialize;

/// 선택적 문자열 정리. 비어 있거나 공백뿐이면 `None`.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `#[serde(deserialize_with = "...")]`용 선택적 문자열 역직렬화기
///
/// `#[serde(default)]`와 함께 쓰면 필드 누락도 `None`으로 처리됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
