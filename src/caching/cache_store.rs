//! 키-값 캐시 추상화
//!
//! 캐시 데코레이터가 의존하는 최소 인터페이스입니다. 값은 이미 직렬화된
//! JSON 문자열로 주고받으며, 직렬화/역직렬화는 호출 측(`CacheAside`)이 담당합니다.

use async_trait::async_trait;

use crate::core::{AppResult, RequestContext};

/// 문자열 키-값 캐시
///
/// 구현체는 모든 실패를 `AppError::RedisError`로 보고합니다.
/// 호출 측은 이 에러를 사용자에게 전파하지 않고 흡수해야 합니다.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// 키에 해당하는 값을 조회합니다. 키가 없으면 `Ok(None)`.
    async fn get_string(&self, ctx: &RequestContext, key: &str) -> AppResult<Option<String>>;

    /// 값을 저장하고 만료 시간(초)을 설정합니다. 기존 값은 덮어씁니다.
    async fn set_with_expiry(
        &self,
        ctx: &RequestContext,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> AppResult<()>;

    async fn del(&self, ctx: &RequestContext, key: &str) -> AppResult<()>;

    async fn del_multiple(&self, ctx: &RequestContext, keys: &[String]) -> AppResult<()>;
}
