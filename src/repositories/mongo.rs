//! MongoDB 리포지토리 공통 헬퍼
//!
//! ObjectId 파싱, BSON/chrono 시각 변환, 드라이버 에러 변환을 모아 둡니다.
//! 드라이버 에러는 원본 그대로 새지 않고 `DatabaseError`로 감싸집니다.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};

use crate::core::errors::AppError;

/// 16진수 ID 문자열을 ObjectId로 변환합니다.
///
/// # Errors
///
/// 형식이 잘못되면 `AppError::ValidationError`
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

/// 여러 ID를 한 번에 변환합니다. 형식이 잘못된 ID는 건너뜁니다.
pub fn parse_object_ids(ids: &[String]) -> Vec<ObjectId> {
    ids.iter()
        .filter_map(|id| ObjectId::parse_str(id).ok())
        .collect()
}

pub fn to_bson_datetime(value: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

pub fn from_bson_datetime(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// 드라이버 에러를 애플리케이션 에러로 변환합니다.
///
/// 유니크 인덱스 위반(11000)은 `ConflictError`, 그 외는 `DatabaseError`.
pub fn db_error(e: mongodb::error::Error) -> AppError {
    use mongodb::error::{ErrorKind, WriteFailure};

    let duplicate = match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    };

    if duplicate {
        AppError::ConflictError("이미 존재하는 값입니다".to_string())
    } else {
        AppError::DatabaseError(e.to_string())
    }
}
