//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 정적 설정 구조체로 중앙집중식 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 환경, 패스워드 해싱, 캐시 설정
//! - [`auth_config`] - JWT 서명 키 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 파싱 실패 시 기본값으로 대체하고 서버는 계속 기동
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{CacheConfig, JwtConfig, ServerConfig};
//!
//! let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let token_service = TokenService::new(JwtConfig::secret().as_bytes());
//!
//! if CacheConfig::enabled() {
//!     // 리포지토리를 캐시 데코레이터로 감쌉니다
//! }
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export SERVER_WORKERS="4"
//! export REQUEST_TIMEOUT_SECS="10"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="shop_dev"
//! export REDIS_URL="redis://127.0.0.1:6379"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export BCRYPT_COST="12"
//!
//! # 캐시
//! export CACHE_ENABLED="true"
//! export CACHE_TTL_SECONDS="120"
//! ```

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;
