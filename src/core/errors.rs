//! # Application Error Handling System
//!
//! 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! 인증/인가, 검증, 소유권, 저장소 에러를 하나의 열거형으로 분류하고
//! Actix-Web `ResponseError` 구현을 통해 HTTP 응답으로 자동 변환합니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | HTTP 상태 |
//! |------|------|-----------|
//! | 토큰 | `InvalidToken`, `InvalidClaims` | 401 |
//! | 로그인 | `PrincipalNotFound`, `PasswordMismatch` | 401 |
//! | 입력 검증 | `ValidationError` | 400 |
//! | 소유권 | `Forbidden` | 403 |
//! | 조회 | `NotFound` | 404 |
//! | 중복 | `ConflictError` | 409 |
//! | 취소/기한 초과 | `Cancelled` | 408 |
//! | 저장소 | `DatabaseError`, `RedisError`, `InternalError` | 500 |
//!
//! 인증 계열 에러는 모두 같은 응답 본문(`{"error": "Unauthorized"}`)으로 닫힙니다.
//! 토큰 누락, 만료, 서명 오류, 알 수 없는 이메일, 비밀번호 불일치 중
//! 무엇이 실패했는지는 로그에만 남고 클라이언트에는 드러나지 않습니다.
//!
//! `RedisError`는 캐시 계층 내부에서만 생성되며 캐시 데코레이터가 흡수합니다.
//! 리포지토리 밖으로 전파되지 않습니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find(&self, ctx: &RequestContext, id: &str) -> AppResult<Product> {
//!     self.products
//!         .find_by_id(ctx, id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 서명 오류, 형식 오류, 만료된 토큰
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// 서명은 유효하지만 페이로드를 클레임으로 해석할 수 없음
    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    /// 이메일에 해당하는 사용자가 없음
    #[error("Principal not found: {0}")]
    PrincipalNotFound(String),

    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 소유권 또는 역할 위반
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    /// 요청 취소 또는 데드라인 초과
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 인증/인가 단계에서 발생하는 에러인지 확인
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AppError::InvalidToken(_)
                | AppError::InvalidClaims(_)
                | AppError::PrincipalNotFound(_)
                | AppError::PasswordMismatch
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::InvalidToken(_)
            | AppError::InvalidClaims(_)
            | AppError::PrincipalNotFound(_)
            | AppError::PasswordMismatch => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::Cancelled(_) => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let body = if self.is_unauthorized() {
            serde_json::json!({ "error": "Unauthorized" })
        } else {
            serde_json::json!({ "error": self.to_string() })
        };

        actix_web::HttpResponse::build(self.status_code()).json(body)
    }
}

/// 애플리케이션 결과 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 메시지를 덧붙여 `InternalError`로 변환하는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
