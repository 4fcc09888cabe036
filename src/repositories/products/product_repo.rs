//! # 상품 리포지토리
//!
//! 상품 저장소 계약(`ProductRepository`)과 MongoDB 구현체입니다.
//! 일괄 삭제는 삭제한 ID 목록을 반환하여 캐시 데코레이터가 단건 키를 지울 수 있게 합니다.

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
use crate::domain::entities::products::Product;
use crate::repositories::mongo::{
    db_error, from_bson_datetime, parse_object_id, parse_object_ids, to_bson_datetime,
};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn save(&self, ctx: &RequestContext, product: Product) -> AppResult<Product>;

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Product>>;

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<Product>>;

    /// 특정 사용자가 등록한 상품 목록
    async fn find_by_creator(&self, ctx: &RequestContext, user_id: &str)
    -> AppResult<Vec<Product>>;

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        product: Product,
    ) -> AppResult<Option<Product>>;

    async fn delete_one(&self, ctx: &RequestContext, id: &str) -> AppResult<bool>;

    /// 사용자가 등록한 상품을 모두 삭제하고 삭제된 ID 목록을 반환합니다.
    async fn delete_all_by_user(&self, ctx: &RequestContext, user_id: &str)
    -> AppResult<Vec<String>>;
}

/// `products` 컬렉션 문서
#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    price: f64,
    detail: String,
    created_by: String,
    created_at: DateTime,
    updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deleted_at: Option<DateTime>,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: None,
            title: product.title.clone(),
            price: product.price,
            detail: product.detail.clone(),
            created_by: product.created_by.clone(),
            created_at: to_bson_datetime(&product.created_at),
            updated_at: to_bson_datetime(&product.updated_at),
            deleted_at: product.deleted_at.as_ref().map(to_bson_datetime),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(document: ProductDocument) -> Self {
        Self {
            id: document.id.map(|id| id.to_hex()),
            title: document.title,
            price: document.price,
            detail: document.detail,
            created_by: document.created_by,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
            deleted_at: document.deleted_at.map(from_bson_datetime),
        }
    }
}

#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub const COLLECTION: &'static str = "products";

    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(Self::COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let creator_index = IndexModel::builder()
            .keys(doc! { "created_by": 1 })
            .options(
                IndexOptions::builder()
                    .name("created_by_asc".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(creator_index)
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn find_documents(
        &self,
        ctx: &RequestContext,
        filter: mongodb::bson::Document,
    ) -> AppResult<Vec<ProductDocument>> {
        ctx.run(async {
            self.collection
                .find(filter)
                .await
                .map_err(db_error)?
                .try_collect()
                .await
                .map_err(db_error)
        })
        .await
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn save(&self, ctx: &RequestContext, mut product: Product) -> AppResult<Product> {
        let document = ProductDocument::from(&product);

        let result = ctx
            .run(async { self.collection.insert_one(&document).await.map_err(db_error) })
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 ID를 읽을 수 없습니다".to_string()))?;

        product.id = Some(id.to_hex());
        Ok(product)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;

        let document = ctx
            .run(async {
                self.collection
                    .find_one(doc! { "_id": object_id })
                    .await
                    .map_err(db_error)
            })
            .await?;

        Ok(document.map(Product::from))
    }

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<Product>> {
        let documents = self.find_documents(ctx, doc! {}).await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }

    async fn find_by_creator(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> AppResult<Vec<Product>> {
        let documents = self
            .find_documents(ctx, doc! { "created_by": user_id })
            .await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        product: Product,
    ) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;
        let replacement = ProductDocument::from(&product);

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

        Ok(updated.map(Product::from))
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

    async fn delete_all_by_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> AppResult<Vec<String>> {
        let ids: Vec<String> = self
            .find_documents(ctx, doc! { "created_by": user_id })
            .await?
            .into_iter()
            .filter_map(|document| document.id.map(|id| id.to_hex()))
            .collect();

        if ids.is_empty() {
            return Ok(ids);
        }

        let object_ids = parse_object_ids(&ids);
        ctx.run(async {
            self.collection
                .delete_many(doc! { "_id": { "$in": object_ids } })
                .await
                .map_err(db_error)
        })
        .await?;

        Ok(ids)
    }
}
