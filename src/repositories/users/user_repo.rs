//! # 사용자 리포지토리
//!
//! 사용자 저장소 계약(`UserRepository`)과 MongoDB 구현체입니다.
//!
//! ## 특징
//!
//! - 모든 메서드는 `RequestContext`를 받아 취소/데드라인을 드라이버 호출까지 전달합니다.
//! - 드라이버 에러는 `DatabaseError`로 감싸지고, 이메일 유니크 인덱스 위반은 `ConflictError`가 됩니다.
//! - 캐시는 이 타입이 아닌 [`CachedUserRepository`](super::CachedUserRepository)가 담당합니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{DateTime, doc, oid::ObjectId},
    options::{FindOneAndReplaceOptions, IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, AppResult, RequestContext};
use crate::db::Database;
use crate::domain::entities::users::{Role, User};
use crate::repositories::mongo::{db_error, from_bson_datetime, parse_object_id, to_bson_datetime};

/// 사용자 저장소 계약
///
/// ID와 이메일은 불투명한 문자열로 다룹니다.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 새 사용자를 저장하고 ID가 채워진 사용자를 반환합니다.
    async fn save(&self, ctx: &RequestContext, user: User) -> AppResult<User>;

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> AppResult<Option<User>>;

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<User>>;

    /// ID에 해당하는 사용자를 통째로 교체합니다. 대상이 없으면 `Ok(None)`.
    async fn update_one(&self, ctx: &RequestContext, id: &str, user: User)
    -> AppResult<Option<User>>;

    /// 삭제 여부를 반환합니다.
    async fn delete_one(&self, ctx: &RequestContext, id: &str) -> AppResult<bool>;
}

/// `users` 컬렉션 문서
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    username: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: DateTime,
    updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deleted_at: Option<DateTime>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id: None,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            created_at: to_bson_datetime(&user.created_at),
            updated_at: to_bson_datetime(&user.updated_at),
            deleted_at: user.deleted_at.as_ref().map(to_bson_datetime),
        }
    }
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        Self {
            id: document.id.map(|id| id.to_hex()),
            username: document.username,
            email: document.email,
            password_hash: document.password_hash,
            role: document.role,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
            deleted_at: document.deleted_at.map(from_bson_datetime),
        }
    }
}

/// MongoDB 사용자 저장소
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(Self::COLLECTION),
        }
    }

    /// 이메일 유니크 인덱스와 생성일 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn save(&self, ctx: &RequestContext, mut user: User) -> AppResult<User> {
        let document = UserDocument::from(&user);

        let result = ctx
            .run(async { self.collection.insert_one(&document).await.map_err(db_error) })
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 ID를 읽을 수 없습니다".to_string()))?;

        user.id = Some(id.to_hex());
        Ok(user)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;

        let document = ctx
            .run(async {
                self.collection
                    .find_one(doc! { "_id": object_id })
                    .await
                    .map_err(db_error)
            })
            .await?;

        Ok(document.map(User::from))
    }

    async fn find_by_email(&self, ctx: &RequestContext, email: &str) -> AppResult<Option<User>> {
        let document = ctx
            .run(async {
                self.collection
                    .find_one(doc! { "email": email })
                    .await
                    .map_err(db_error)
            })
            .await?;

        Ok(document.map(User::from))
    }

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<User>> {
        let documents: Vec<UserDocument> = ctx
            .run(async {
                self.collection
                    .find(doc! {})
                    .await
                    .map_err(db_error)?
                    .try_collect()
                    .await
                    .map_err(db_error)
            })
            .await?;

        Ok(documents.into_iter().map(User::from).collect())
    }

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        user: User,
    ) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;
        let replacement = UserDocument::from(&user);

        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = ctx
            .run(async {
                self.collection
                    .find_one_and_replace(doc! { "_id": object_id }, &replacement)
                    .with_options(options)
                    .await
                    .map_err(db_error)
            })
            .await?;

        Ok(updated.map(User::from))
    }

    async fn delete_one(&self, ctx: &RequestContext, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;

        let result = ctx
            .run(async {
                self.collection
                    .delete_one(doc! { "_id": object_id })
                    .await
                    .map_err(db_error)
            })
            .await?;

        Ok(result.deleted_count > 0)
    }
}
