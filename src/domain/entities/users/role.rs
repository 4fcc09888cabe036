//! 사용자 역할

use serde::{Deserialize, Serialize};
use std::fmt;

/// 사용자 역할
///
/// 저장소와 캐시에는 소문자 문자열(`"user"`, `"seller"`, `"admin"`)로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }

    /// 문자열에서 Role을 생성합니다. 대소문자를 구분하지 않습니다.
    ///
    /// # Errors
    ///
    /// 알 수 없는 역할 이름이면 에러 메시지를 반환합니다.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(format!("알 수 없는 역할: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
