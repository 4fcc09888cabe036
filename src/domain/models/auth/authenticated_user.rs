//! 인증/인가를 모두 통과한 요청의 주체
//!
//! `AuthMiddleware`가 두 단계를 통과시킨 뒤 요청 extensions에 넣고,
//! 핸들러는 추출자로 받아 서비스 계층에 이메일을 넘깁니다.

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

/// 인가까지 통과한 사용자
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub email: String,
}

impl AuthenticatedUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                serde_json::json!({ "error": "Unauthorized" }),
            ))),
        }
    }
}
