//! 회원가입 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 회원가입 요청
///
/// 역할은 요청 본문이 아닌 라우트가 결정합니다 (`/register` → user, `/register/seller` → seller).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "사용자명은 1-50자 사이여야 합니다"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 4, message = "비밀번호는 최소 4자 이상이어야 합니다"))]
    pub password: String,
}
