//! 요청 검증 헬퍼
//!
//! `validator` 크레이트의 검증 결과를 `AppError::ValidationError`로 변환합니다.

use validator::Validate;

use crate::core::errors::{AppError, AppResult};

/// `Validate` 구현체를 검증하고 실패 시 `ValidationError`를 반환합니다.
///
/// ```rust,ignore
/// validate_request(&payload)?;
/// ```
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Signup {
        #[validate(email)]
        email: String,
        #[validate(length(min = 4))]
        password: String,
    }

    #[test]
    fn test_validate_request_maps_errors() {
        let ok = Signup {
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(validate_request(&ok).is_ok());

        let bad = Signup {
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
        };
        match validate_request(&bad) {
            Err(AppError::ValidationError(msg)) => {
                assert!(msg.contains("email"));
                assert!(msg.contains("password"));
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }
}
