//! 프로필 수정 요청 DTO

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::string_utils::deserialize_optional_string;

/// 프로필 부분 수정 요청
///
/// 비어 있거나 누락된 필드는 기존 값을 유지합니다.
/// 역할은 이 요청으로 변경할 수 없습니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 50, message = "사용자명은 50자 이하여야 합니다"))]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    /// 비어 있지 않으면 재해싱하여 교체
    #[serde(default)]
    #[validate(custom(function = "validate_new_password"))]
    pub password: Option<String>,
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if !password.is_empty() && password.chars().count() < 4 {
        return Err(ValidationError::new("password_too_short")
            .with_message("비밀번호는 최소 4자 이상이어야 합니다".into()));
    }
    Ok(())
}

impl UpdateUserRequest {
    /// 실제로 교체할 비밀번호. 빈 문자열은 "변경 없음".
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}
