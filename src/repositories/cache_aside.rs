//! # Cache-Aside 헬퍼
//!
//! 엔티티별 캐시 데코레이터(`CachedUserRepository` 등)가 공유하는 키 규칙과
//! 읽기/쓰기/무효화 절차를 구현합니다.
//!
//! ## 키 규칙
//!
//! ```text
//! <namespace>::<entity>:<id 또는 email>   단건
//! <namespace>::<entity>s                  전체 목록
//! ```
//!
//! 값은 엔티티(또는 엔티티 목록)의 JSON 문자열이며 고정 TTL로 저장됩니다.
//!
//! ## 실패 처리
//!
//! 캐시 에러는 절대 호출자에게 전파되지 않습니다.
//! - 조회 실패, 역직렬화 실패 → 미스로 취급하고 저장소에서 읽음
//! - 저장/삭제 실패 → `warn` 로그만 남김
//!
//! 캐시 갱신과 무효화는 항상 저장소 작업이 성공한 뒤에만 호출되어야 합니다.
//! 커밋 이후의 캐시 작업은 요청 컨텍스트가 아닌 별도의 짧은 컨텍스트에서 실행되므로
//! 요청이 취소되거나 데드라인에 걸려도 건너뛰지 않습니다.
//! 수정 후 덮어쓰기에 실패하면 해당 키를 지워 이전 값이 남지 않게 합니다.
//! 삭제마저 실패한 키는 낡은 키로 기록해 두고, 삭제나 새 값 저장이 성공할 때까지
//! 조회 시 미스로 취급합니다.

use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::caching::CacheStore;
use crate::core::{AppResult, RequestContext};

/// 커밋 이후 캐시 작업에 주어지는 시간
const MAINTENANCE_TIMEOUT: Duration = Duration::from_secs(2);

/// 캐시 저장소 + 키 네임스페이스 + TTL
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    namespace: String,
    ttl_seconds: u64,
    stale: Arc<Mutex<HashSet<String>>>,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, namespace: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            ttl_seconds,
            stale: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// 단건 키: `<ns>::<entity>:<id>`
    pub fn entity_key(&self, entity: &str, id: &str) -> String {
        format!("{}::{}:{}", self.namespace, entity, id)
    }

    /// 목록 키: `<ns>::<entity>s`
    pub fn collection_key(&self, entity: &str) -> String {
        format!("{}::{}s", self.namespace, entity)
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// 단건 read-through
    ///
    /// 캐시 히트면 저장소를 건드리지 않고 반환합니다. 미스, 캐시 에러,
    /// 역직렬화 실패 시 `load`로 저장소에서 읽고 결과가 있으면 캐시에 씁니다.
    /// 저장소에 없는 값(`None`)은 캐시하지 않습니다.
    ///
    /// # Errors
    ///
    /// `load`가 반환한 저장소 에러만 전파됩니다.
    pub async fn read_through<T, F, Fut>(
        &self,
        ctx: &RequestContext,
        key: &str,
        load: F,
    ) -> AppResult<Option<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Option<T>>>,
    {
        if let Some(hit) = self.lookup::<T>(ctx, key).await {
            return Ok(Some(hit));
        }

        let loaded = load().await?;
        if let Some(value) = &loaded {
            self.put(key, value).await;
        }

        Ok(loaded)
    }

    /// 목록 read-through. 빈 목록도 캐시합니다.
    pub async fn read_through_all<T, F, Fut>(
        &self,
        ctx: &RequestContext,
        key: &str,
        load: F,
    ) -> AppResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<T>>>,
    {
        if let Some(hit) = self.lookup::<Vec<T>>(ctx, key).await {
            return Ok(hit);
        }

        let loaded = load().await?;
        self.put(key, &loaded).await;

        Ok(loaded)
    }

    /// 값을 직렬화하여 TTL과 함께 저장합니다 (best-effort). 성공 여부를 반환합니다.
    pub async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("캐시 직렬화 실패 [{}]: {}", key, e);
                return false;
            }
        };

        let ctx = Self::maintenance_ctx();
        match self
            .store
            .set_with_expiry(&ctx, key, &json, self.ttl_seconds)
            .await
        {
            Ok(()) => {
                self.stale_keys().remove(key);
                true
            }
            Err(e) => {
                warn!("캐시 저장 실패 [{}]: {}", key, e);
                false
            }
        }
    }

    /// 수정된 값으로 키를 덮어씁니다. 덮어쓰기에 실패하면 키를 지웁니다.
    pub async fn refresh<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if !self.put(key, value).await {
            self.evict(&[key.to_string()]).await;
        }
    }

    /// 키들을 삭제합니다 (best-effort).
    pub async fn evict(&self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }

        let ctx = Self::maintenance_ctx();
        match self.store.del_multiple(&ctx, keys).await {
            Ok(()) => {
                let mut stale = self.stale_keys();
                for key in keys {
                    stale.remove(key);
                }
            }
            Err(e) => {
                warn!("캐시 무효화 실패, 낡은 키로 기록 {:?}: {}", keys, e);
                self.stale_keys().extend(keys.iter().cloned());
            }
        }
    }

    fn is_stale(&self, key: &str) -> bool {
        self.stale_keys().contains(key)
    }

    fn stale_keys(&self) -> MutexGuard<'_, HashSet<String>> {
        self.stale.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // 요청 취소와 무관한 컨텍스트
    fn maintenance_ctx() -> RequestContext {
        RequestContext::new(Some(MAINTENANCE_TIMEOUT))
    }

    /// 캐시 조회. 미스와 모든 실패를 `None`으로 합칩니다.
    ///
    /// 역직렬화는 항상 새로 할당된 소유 값으로 이루어집니다.
    async fn lookup<V: DeserializeOwned>(&self, ctx: &RequestContext, key: &str) -> Option<V> {
        if self.is_stale(key) {
            debug!("낡은 키, 삭제 재시도: {}", key);
            self.evict(&[key.to_string()]).await;
            return None;
        }

        match self.store.get_string(ctx, key).await {
            Ok(Some(json)) => match serde_json::from_str::<V>(&json) {
                Ok(value) => {
                    debug!("캐시 히트: {}", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("캐시 엔트리 역직렬화 실패, 저장소에서 조회 [{}]: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("캐시 미스: {}", key);
                None
            }
            Err(e) => {
                warn!("캐시 조회 실패, 저장소에서 조회 [{}]: {}", key, e);
                None
            }
        }
    }
}
