//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 [`CacheStore`] 구현체를 제공합니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`는 멀티플렉싱된 단일 연결을 공유하며 연결이 끊기면
//! 자동으로 재연결합니다. 복제 비용이 낮으므로 호출마다 복제해 사용합니다.
//!
//! ## 에러 처리
//!
//! 모든 Redis 에러는 `AppError::RedisError`로 변환됩니다. 모든 호출은
//! `RequestContext::run`을 거치므로 요청 취소/데드라인 초과 시 즉시 중단됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let redis: Arc<dyn CacheStore> = Arc::new(RedisClient::new().await?);
//! let cache = CacheAside::new(redis, CacheConfig::namespace(), CacheConfig::ttl_seconds());
//! ```

use async_trait::async_trait;
use log::info;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::env;

use crate::caching::CacheStore;
use crate::core::{AppError, AppResult, RequestContext};

/// Redis 캐시 클라이언트
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// 새 Redis 클라이언트를 생성하고 `PING`으로 서버 가용성을 확인합니다.
    ///
    /// ## 환경 변수
    /// - `REDIS_URL`: Redis 연결 URL (기본값: "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// URL 파싱 실패, 연결 실패, PING 실패 시 에러를 반환합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = redis::Client::open(redis_url)?;
        let mut manager = ConnectionManager::new(client).await?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }
}

fn to_cache_error(e: redis::RedisError) -> AppError {
    AppError::RedisError(e.to_string())
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn get_string(&self, ctx: &RequestContext, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        ctx.run(async move { conn.get::<_, Option<String>>(key).await.map_err(to_cache_error) })
            .await
    }

    async fn set_with_expiry(
        &self,
        ctx: &RequestContext,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.manager.clone();
        ctx.run(async move {
            conn.set_ex::<_, _, ()>(key, value, seconds)
                .await
                .map_err(to_cache_error)
        })
        .await
    }

    async fn del(&self, ctx: &RequestContext, key: &str) -> AppResult<()> {
        let mut conn = self.manager.clone();
        ctx.run(async move { conn.del::<_, ()>(key).await.map_err(to_cache_error) })
            .await
    }

    async fn del_multiple(&self, ctx: &RequestContext, keys: &[String]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.manager.clone();
        ctx.run(async move { conn.del::<_, ()>(keys).await.map_err(to_cache_error) })
            .await
    }
}
