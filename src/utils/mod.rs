//! # Utilities
//!
//! - [`string_utils`] - 부분 수정 필드 정규화
//! - [`validation`] - `validator` 결과를 `AppError`로 변환

pub mod string_utils;
pub mod validation;
