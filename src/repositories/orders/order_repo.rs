//! # 주문 리포지토리
//!
//! 주문 저장소 계약(`OrderRepository`)과 MongoDB 구현체입니다.
//! 사용자 삭제, 상품 삭제 시의 연쇄 삭제를 위해 두 가지 일괄 삭제를 제공합니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{DateTime, Document, doc, oid::ObjectId},
    options::{FindOneAndReplaceOptions, IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};

use crate::core::{AppError, AppResult, RequestContext};
use crate::db::Database;
use crate::domain::entities::orders::Order;
use crate::repositories::mongo::{
    db_error, from_bson_datetime, parse_object_id, parse_object_ids, to_bson_datetime,
};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save(&self, ctx: &RequestContext, order: Order) -> AppResult<Order>;

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Order>>;

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<Order>>;

    /// 특정 사용자의 주문 목록
    async fn find_by_user(&self, ctx: &RequestContext, user_id: &str) -> AppResult<Vec<Order>>;

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        order: Order,
    ) -> AppResult<Option<Order>>;

    async fn delete_one(&self, ctx: &RequestContext, id: &str) -> AppResult<bool>;

    /// 사용자의 주문을 모두 삭제하고 삭제된 ID 목록을 반환합니다.
    async fn delete_all_by_user(&self, ctx: &RequestContext, user_id: &str)
    -> AppResult<Vec<String>>;

    /// 상품을 참조하는 주문을 모두 삭제하고 삭제된 ID 목록을 반환합니다.
    async fn delete_all_by_product(
        &self,
        ctx: &RequestContext,
        product_id: &str,
    ) -> AppResult<Vec<String>>;
}

/// `orders` 컬렉션 문서
#[derive(Debug, Serialize, Deserialize)]
struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    user_id: String,
    product_id: String,
    created_at: DateTime,
    updated_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deleted_at: Option<DateTime>,
}

impl From<&Order> for OrderDocument {
    fn from(order: &Order) -> Self {
        Self {
            id: None,
            user_id: order.user_id.clone(),
            product_id: order.product_id.clone(),
            created_at: to_bson_datetime(&order.created_at),
            updated_at: to_bson_datetime(&order.updated_at),
            deleted_at: order.deleted_at.as_ref().map(to_bson_datetime),
        }
    }
}

impl From<OrderDocument> for Order {
    fn from(document: OrderDocument) -> Self {
        Self {
            id: document.id.map(|id| id.to_hex()),
            user_id: document.user_id,
            product_id: document.product_id,
            created_at: from_bson_datetime(document.created_at),
            updated_at: from_bson_datetime(document.updated_at),
            deleted_at: document.deleted_at.map(from_bson_datetime),
        }
    }
}

#[derive(Clone)]
pub struct MongoOrderRepository {
    collection: Collection<OrderDocument>,
}

impl MongoOrderRepository {
    pub const COLLECTION: &'static str = "orders";

    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(Self::COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().name("user_id_asc".to_string()).build())
            .build();

        let product_index = IndexModel::builder()
            .keys(doc! { "product_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("product_id_asc".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes([user_index, product_index])
            .await
            .map_err(db_error)?;

        Ok(())
    }

    async fn find_documents(
        &self,
        ctx: &RequestContext,
        filter: Document,
    ) -> AppResult<Vec<OrderDocument>> {
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

    /// 필터에 맞는 주문을 찾아 삭제하고 삭제된 ID를 반환합니다.
    async fn delete_matching(&self, ctx: &RequestContext, filter: Document) -> AppResult<Vec<String>> {
        let ids: Vec<String> = self
            .find_documents(ctx, filter)
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

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    async fn save(&self, ctx: &RequestContext, mut order: Order) -> AppResult<Order> {
        let document = OrderDocument::from(&order);

        let result = ctx
            .run(async { self.collection.insert_one(&document).await.map_err(db_error) })
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 ID를 읽을 수 없습니다".to_string()))?;

        order.id = Some(id.to_hex());
        Ok(order)
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: &str) -> AppResult<Option<Order>> {
        let object_id = parse_object_id(id)?;

        let document = ctx
            .run(async {
                self.collection
                    .find_one(doc! { "_id": object_id })
                    .await
                    .map_err(db_error)
            })
            .await?;

        Ok(document.map(Order::from))
    }

    async fn find(&self, ctx: &RequestContext) -> AppResult<Vec<Order>> {
        let documents = self.find_documents(ctx, doc! {}).await?;
        Ok(documents.into_iter().map(Order::from).collect())
    }

    async fn find_by_user(&self, ctx: &RequestContext, user_id: &str) -> AppResult<Vec<Order>> {
        let documents = self
            .find_documents(ctx, doc! { "user_id": user_id })
            .await?;
        Ok(documents.into_iter().map(Order::from).collect())
    }

    async fn update_one(
        &self,
        ctx: &RequestContext,
        id: &str,
        order: Order,
    ) -> AppResult<Option<Order>> {
        let object_id = parse_object_id(id)?;
        let replacement = OrderDocument::from(&order);

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

        Ok(updated.map(Order::from))
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
        self.delete_matching(ctx, doc! { "user_id": user_id }).await
    }

    async fn delete_all_by_product(
        &self,
        ctx: &RequestContext,
        product_id: &str,
    ) -> AppResult<Vec<String>> {
        self.delete_matching(ctx, doc! { "product_id": product_id })
            .await
    }
}
