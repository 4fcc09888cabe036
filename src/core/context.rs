//! 요청 범위 취소/데드라인 컨텍스트
//!
//! 모든 저장소 및 캐시 호출 시그니처에 명시적으로 전달되는 컨텍스트입니다.
//! 전역 요청 객체 대신 `RequestContext`를 값으로 흘려보내며,
//! 취소 토큰과 데드라인 중 먼저 도달하는 쪽이 진행 중인 호출을 중단합니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! let ctx = RequestContext::new(Some(Duration::from_secs(5)));
//!
//! let user = ctx
//!     .run(async { collection.find_one(filter).await.map_err(to_db_error) })
//!     .await?;
//! ```
//!
//! 핸들러에서는 `FromRequest` 추출자로 받습니다. 인증 미들웨어를 통과한 요청은
//! 미들웨어가 사용한 컨텍스트를 그대로 이어받습니다.

use std::future::{Future, Ready, ready};
use std::time::{Duration, Instant};

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::core::errors::{AppError, AppResult};

/// 요청 하나의 생명주기 동안 유지되는 취소 신호와 데드라인
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// 기본 요청 타임아웃
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// 새 컨텍스트를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `timeout` - 지금부터 적용할 데드라인. `None`이면 데드라인 없이 취소 신호만 사용합니다.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: timeout.map(|t| Instant::now() + t),
        }
    }

    /// 데드라인이 없는 컨텍스트 (부트스트랩, 테스트용)
    pub fn background() -> Self {
        Self::new(None)
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// 퓨처를 취소 신호 및 데드라인과 경합시켜 실행합니다.
    ///
    /// 이미 취소된 컨텍스트는 퓨처를 시작하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Cancelled` - 취소되었거나 데드라인이 지난 경우
    /// * 그 외 - 퓨처가 반환한 에러
    pub async fn run<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        if self.is_cancelled() {
            return Err(AppError::Cancelled("요청이 취소되었습니다".to_string()));
        }

        let raced = async {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => {
                    Err(AppError::Cancelled("요청이 취소되었습니다".to_string()))
                }
                result = fut => result,
            }
        };

        match self.deadline {
            Some(deadline) => {
                tokio::time::timeout_at(tokio::time::Instant::from_std(deadline), raced)
                    .await
                    .unwrap_or_else(|_| {
                        Err(AppError::Cancelled("요청 데드라인을 초과했습니다".to_string()))
                    })
            }
            None => raced.await,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Some(Self::DEFAULT_TIMEOUT))
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let ctx = req
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(|| {
                RequestContext::new(Some(Duration::from_secs(ServerConfig::request_timeout_secs())))
            });

        ready(Ok(ctx))
    }
}
