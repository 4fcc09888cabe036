//! 주문 캐시 데코레이터
//!
//! 키: `<ns>::order:<id>`, `<ns>::orders`.
//! 사용자별 목록(`find_by_user`)은 캐시하지 않습니다.

use async_trait::async_trait;
use std::sync::Arc;

use super::order_repo::OrderRepository;
use crate::core::{AppResult, RequestContext};
use crate::domain::entities::orders::Order;
use crate::repositories::cache_aside::CacheAside;

const ENTITY: &str = "order";

pub struct CachedOrderRepository {
    inner: Arc<dyn OrderRepository>,
    cache: CacheAside,
}

impl CachedOrderRepository {
    pub fn new(inner: Arc<dyn OrderRepository>, cache: CacheAside) -> Self {
        Self { inner, cache }
    }

    fn key(&self, id: &str) -> String {
        self.cache.entity_key(ENTITY, id)
    }

    fn collection_key(&self) -> String {
        self.cache.collection_key(ENTITY)
    }

    async fn evict_removed(&self, ctx: &RequestContext, removed: &[String]) {
        let mut stale: Vec<String> = removed.iter().map(|id| self.key(id)).collect();
        stale.push(self.collection_key());
        self.cache.evict(&stale).await;
    }
}

#[async_trait]
impl OrderRepository for CachedOrderRepository {
    async fn save(&self, ctx: &RequestContext, order: Order) -> AppResult<Order> {
        let saved = self.inner.save(ctx, order).await?;

        if let Some(id) = &saved.id {
            self.cache.put(&self.key(id), &saved).await;
        }
        self.cache.evict(&[self.collection_key()]).await;

        Ok(saved)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Order>> {
        self.cache
            .read_through(ctx, &self.key(id), || self.inner.find_by_id(ctx, id))
            .await
    }

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<Order>> {
        self.cache
            .read_through_all(ctx, &self.collection_key(), || self.inner.find(ctx))
            .await
    }

    async fn find_by_user(&self, ctx: &RequestContext, user_id: &str) -> AppResult<Vec<Order>> {
        self.inner.find_by_user(ctx, user_id).await
    }

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        order: Order,
    ) -> AppResult<Option<Order>> {
        let updated = self.inner.update_one(ctx, id, order).await?;

        match &updated {
            Some(updated_order) => {
                self.cache.refresh(&self.key(id), updated_order).await;
                self.cache.evict(&[self.collection_key()]).await;
            }
            None => {
                self.cache
                    .evict(&[self.key(id), self.collection_key()])
                    .await;
            }
        }

        Ok(updated)
    }

    async fn delete_one(&self, ctx: &RequestContext, id: &str) -> AppResult<bool> {
        let deleted = self.inner.delete_one(ctx, id).await?;

        self.cache
            .evict(&[self.key(id), self.collection_key()])
            .await;

        Ok(deleted)
    }

    async fn delete_all_by_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> AppResult<Vec<String>> {
        let removed = self.inner.delete_all_by_user(ctx, user_id).await?;
        self.evict_removed(ctx, &removed).await;
        Ok(removed)
    }

    async fn delete_all_by_product(
        &self,
        ctx: &RequestContext,
        product_id: &str,
    ) -> AppResult<Vec<String>> {
        let removed = self.inner.delete_all_by_product(ctx, product_id).await?;
        self.evict_removed(ctx, &removed).await;
        Ok(removed)
    }
}
