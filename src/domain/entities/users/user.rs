//! 사용자 엔티티
//!
//! 서비스 계층과 캐시 계층이 공유하는 사용자 표현입니다. MongoDB 문서 매핑은
//! 리포지토리 내부 문서 타입이 담당하며, 이 구조체는 저장 형식을 알지 못합니다.
//! 캐시에는 이 구조체가 그대로 JSON으로 직렬화되어 저장됩니다.

use chrono::{DateTime, Utc};

use crate::domain::entities::now_millis;
use serde::{Deserialize, Serialize};

use super::role::Role;

/// 사용자 엔티티
///
/// # 불변 조건
///
/// - `email`은 전역적으로 유일합니다.
/// - `role`은 가입 시 정해지며 프로필 수정으로 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 저장 전에는 `None`, 저장 후 16진수 ObjectId 문자열
    pub id: Option<String>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// 새 사용자를 생성합니다. ID는 저장 시 부여됩니다.
    pub fn new(username: String, email: String, password_hash: String, role: Role) -> Self {
        let now = now_millis();

        Self {
            id: None,
            username,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}
