//! 상품 캐시 데코레이터
//!
//! 키: `<ns>::product:<id>`, `<ns>::products`.
//! 등록자별 목록(`find_by_creator`)은 캐시하지 않고 그대로 통과시킵니다.

use async_trait::async_trait;
use std::sync::Arc;

use super::product_repo::ProductRepository;
use crate::core::{AppResult, RequestContext};
use crate::domain::entities::products::Product;
use crate::repositories::cache_aside::CacheAside;

const ENTITY: &str = "product";

pub struct CachedProductRepository {
    inner: Arc<dyn ProductRepository>,
    cache: CacheAside,
}

impl CachedProductRepository {
    pub fn new(inner: Arc<dyn ProductRepository>, cache: CacheAside) -> Self {
        Self { inner, cache }
    }

    fn key(&self, id: &str) -> String {
        self.cache.entity_key(ENTITY, id)
    }

    fn collection_key(&self) -> String {
        self.cache.collection_key(ENTITY)
    }
}

#[async_trait]
impl ProductRepository for CachedProductRepository {
    async fn save(&self, ctx: &RequestContext, product: Product) -> AppResult<Product> {
        let saved = self.inner.save(ctx, product).await?;

        if let Some(id) = &saved.id {
            self.cache.put(&self.key(id), &saved).await;
        }
        self.cache.evict(&[self.collection_key()]).await;

        Ok(saved)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Product>> {
        self.cache
            .read_through(ctx, &self.key(id), || self.inner.find_by_id(ctx, id))
            .await
    }

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<Product>> {
        self.cache
            .read_through_all(ctx, &self.collection_key(), || self.inner.find(ctx))
            .await
    }

    async fn find_by_creator(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> AppResult<Vec<Product>> {
        self.inner.find_by_creator(ctx, user_id).await
    }

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        product: Product,
    ) -> AppResult<Option<Product>> {
        let updated = self.inner.update_one(ctx, id, product).await?;

        match &updated {
            Some(updated_product) => {
                self.cache.refresh(&self.key(id), updated_product).await;
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

        let mut stale: Vec<String> = removed.iter().map(|id| self.key(id)).collect();
        stale.push(self.collection_key());
        self.cache.evict(&stale).await;

        Ok(removed)
    }
}
