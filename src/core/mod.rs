//! # Core Module
//!
//! 서비스 전역에서 공유하는 기반 타입을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web ResponseError 자동 구현
//! - **인증 에러 통일**: 인증/인가 실패는 동일한 401 응답으로 닫힘
//!
//! ### [`context`] - 요청 컨텍스트
//! - **RequestContext**: 취소 토큰 + 데드라인
//! - 모든 리포지토리, 캐시 호출의 첫 번째 인자로 전달
//!
//! ## 의존성 구성
//!
//! 전역 서비스 로케이터는 두지 않습니다. 모든 컴포넌트는 생성자에서
//! `Arc<dyn Trait>` 형태로 협력자를 받고, `main`에서 한 번 조립된 뒤
//! `web::Data`로 핸들러에 전달됩니다.
//!
//! ```rust,ignore
//! let users: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(&database));
//! let tokens = Arc::new(TokenService::new(JwtConfig::secret().as_bytes()));
//! let user_service = UserService::new(users, products, orders, tokens, PasswordConfig::bcrypt_cost());
//!
//! App::new().app_data(web::Data::new(user_service));
//! ```

pub mod context;
pub mod errors;

pub use context::*;
pub use errors::*;
