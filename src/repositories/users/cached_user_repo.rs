//! 사용자 캐시 데코레이터
//!
//! 임의의 [`UserRepository`]를 감싸 같은 계약을 구현하면서 캐시 계층을 더합니다.
//!
//! | 키 | 내용 |
//! |----|------|
//! | `<ns>::user:<id>` | 단건 (ID 조회) |
//! | `<ns>::user:<email>` | 단건 (이메일 조회) |
//! | `<ns>::users` | 전체 목록 |
//!
//! 이메일 키도 ID 키와 같은 엔티티를 담으므로, 수정 시 새 이메일 키를 덮어쓰고
//! 이메일이 바뀌었다면 이전 이메일 키를 지웁니다. 삭제 시 두 키를 모두 지웁니다.

use async_trait::async_trait;
use std::sync::Arc;

use super::user_repo::UserRepository;
use crate::core::{AppResult, RequestContext};
use crate::domain::entities::users::User;
use crate::repositories::cache_aside::CacheAside;

const ENTITY: &str = "user";

pub struct CachedUserRepository {
    inner: Arc<dyn UserRepository>,
    cache: CacheAside,
}

impl CachedUserRepository {
    pub fn new(inner: Arc<dyn UserRepository>, cache: CacheAside) -> Self {
        Self { inner, cache }
    }

    fn key(&self, id_or_email: &str) -> String {
        self.cache.entity_key(ENTITY, id_or_email)
    }

    fn collection_key(&self) -> String {
        self.cache.collection_key(ENTITY)
    }
}

#[async_trait]
impl UserRepository for CachedUserRepository {
    async fn save(&self, ctx: &RequestContext, user: User) -> AppResult<User> {
        let saved = self.inner.save(ctx, user).await?;

        if let Some(id) = &saved.id {
            self.cache.put(&self.key(id), &saved).await;
        }
        self.cache.evict(&[self.collection_key()]).await;

        Ok(saved)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<User>> {
        self.cache
            .read_through(ctx, &self.key(id), || self.inner.find_by_id(ctx, id))
            .await
    }

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> AppResult<Option<User>> {
        self.cache
            .read_through(ctx, &self.key(email), || self.inner.find_by_email(ctx, email))
            .await
    }

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        self.cache
            .read_through_all(ctx, &self.collection_key(), || self.inner.find(ctx))
            .await
    }

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        user: User,
    ) -> AppResult<Option<User>> {
        let previous_email = self
            .inner
            .find_by_id(ctx, id)
            .await?
            .map(|previous| previous.email);

        let updated = self.inner.update_one(ctx, id, user).await?;

        match &updated {
            Some(updated_user) => {
                self.cache.refresh(&self.key(id), updated_user).await;
                self.cache
                    .refresh(&self.key(&updated_user.email), updated_user)
                    .await;

                let mut stale = vec![self.collection_key()];
                if let Some(old_email) = previous_email.filter(|e| *e != updated_user.email) {
                    stale.push(self.key(&old_email));
                }
                self.cache.evict(&stale).await;
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
        let previous = self.inner.find_by_id(ctx, id).await?;

        let deleted = self.inner.delete_one(ctx, id).await?;

        let mut stale = vec![self.key(id), self.collection_key()];
        if let Some(previous) = previous {
            stale.push(self.key(&previous.email));
        }
        self.cache.evict(&stale).await;

        Ok(deleted)
    }
}
