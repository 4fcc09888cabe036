//! # 주문 서비스
//!
//! 주문자는 인증된 사용자로 기록되며 주문자 본인만 조회/수정/삭제할 수 있습니다.
//! 주문 생성과 상품 변경 시 참조 상품이 존재해야 합니다.

use std::sync::Arc;

use crate::core::{AppError, AppResult, RequestContext};
use crate::domain::dto::orders::{CreateOrderRequest, OrderResponse, UpdateOrderRequest};
use crate::domain::entities::now_millis;
use crate::domain::entities::orders::Order;
use crate::repositories::orders::OrderRepository;
use crate::repositories::products::ProductRepository;
use crate::repositories::users::UserRepository;
use crate::services::ownership::{Principal, ensure_owner, resolve_principal};
use crate::utils::validation::validate_request;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            users,
        }
    }

    /// 주문을 생성합니다. `user_id`는 인증된 사용자 ID로 채워집니다.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateOrderRequest,
        acting_email: &str,
    ) -> AppResult<OrderResponse> {
        validate_request(&request)?;

        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;
        self.ensure_product_exists(ctx, &request.product_id).await?;

        let created = self
            .orders
            .save(ctx, Order::new(principal.id, request.product_id))
            .await?;

        log::info!("주문 생성: {:?} by {}", created.id, acting_email);
        Ok(OrderResponse::from(created))
    }

    /// 본인 주문 하나를 조회합니다.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: &str,
        acting_email: &str,
    ) -> AppResult<OrderResponse> {
        let (_, order) = self.owned_order(ctx, id, acting_email).await?;
        Ok(OrderResponse::from(order))
    }

    /// 인증된 사용자의 주문 목록
    pub async fn get_mine(
        &self,
        ctx: &RequestContext,
        acting_email: &str,
    ) -> AppResult<Vec<OrderResponse>> {
        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;
        let orders = self.orders.find_by_user(ctx, &principal.id).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// 전체 주문 목록. 라우트에서 관리자 역할로 제한됩니다.
    pub async fn get_all(&self, ctx: &RequestContext) -> AppResult<Vec<OrderResponse>> {
        let orders = self.orders.find(ctx).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// 주문 상품을 변경합니다. 비어 있으면 기존 상품을 유지합니다.
    pub async fn edit(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: UpdateOrderRequest,
        acting_email: &str,
    ) -> AppResult<OrderResponse> {
        let (_, mut updated) = self.owned_order(ctx, id, acting_email).await?;

        if let Some(product_id) = request.product_id {
            if product_id != updated.product_id {
                self.ensure_product_exists(ctx, &product_id).await?;
                updated.product_id = product_id;
            }
        }
        updated.updated_at = now_millis();

        let saved = self
            .orders
            .update_one(ctx, id, updated)
            .await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        Ok(OrderResponse::from(saved))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str, acting_email: &str) -> AppResult<()> {
        self.owned_order(ctx, id, acting_email).await?;

        if !self.orders.delete_one(ctx, id).await? {
            return Err(AppError::NotFound("주문을 찾을 수 없습니다".to_string()));
        }

        log::info!("주문 삭제: {} by {}", id, acting_email);
        Ok(())
    }

    /// 행위자 → 대상 주문 → 소유권 순으로 확인합니다.
    async fn owned_order(
        &self,
        ctx: &RequestContext,
        id: &str,
        acting_email: &str,
    ) -> AppResult<(Principal, Order)> {
        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;

        let order = self
            .orders
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다".to_string()))?;

        ensure_owner(&principal, &order.user_id, "주문")?;
        Ok((principal, order))
    }

    async fn ensure_product_exists(&self, ctx: &RequestContext, product_id: &str) -> AppResult<()> {
        match self.products.find_by_id(ctx, product_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::Role;
    use crate::testing::{Harness, product};

    async fn seeded() -> (Harness, String) {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let seller = h.seed_user("sam", "sam@example.com", Role::Seller).await;
        h.seed_user("bob", "bob@example.com", Role::User).await;
        h.seed_user("eve", "eve@example.com", Role::User).await;
        let lamp = h
            .products
            .save(&ctx, product("Desk lamp", seller.id.as_deref().unwrap()))
            .await
            .unwrap();
        (h, lamp.id.unwrap())
    }

    fn order_for(product_id: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            product_id: product_id.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_create_stamps_buyer_and_lists_as_mine() {
        let (h, product_id) = seeded().await;
        let ctx = RequestContext::background();

        let created = h
            .order_service
            .create(&ctx, order_for(&product_id), "bob@example.com")
            .await
            .unwrap();
        let bob = h.users.find_by_email(&ctx, "bob@example.com").await.unwrap().unwrap();

        assert_eq!(Some(created.user_id.clone()), bob.id);

        let mine = h.order_service.get_mine(&ctx, "bob@example.com").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(h.order_service.get_mine(&ctx, "eve@example.com").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_create_for_missing_product_is_not_found() {
        let (h, _) = seeded().await;
        let ctx = RequestContext::background();

        let result = h
            .order_service
            .create(&ctx, order_for("ffffffffffffffffffffffff"), "bob@example.com")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(h.orders.find(&ctx).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_other_buyer_cannot_read_edit_or_delete() {
        let (h, product_id) = seeded().await;
        let ctx = RequestContext::background();
        let created = h
            .order_service
            .create(&ctx, order_for(&product_id), "bob@example.com")
            .await
            .unwrap();

        let get = h.order_service.get(&ctx, &created.id, "eve@example.com").await;
        let edit = h
            .order_service
            .edit(&ctx, &created.id, UpdateOrderRequest::default(), "eve@example.com")
            .await;
        let delete = h.order_service.delete(&ctx, &created.id, "eve@example.com").await;

        assert!(matches!(get, Err(AppError::Forbidden(_))));
        assert!(matches!(edit, Err(AppError::Forbidden(_))));
        assert!(matches!(delete, Err(AppError::Forbidden(_))));
        assert!(h.order_service.get(&ctx, &created.id, "bob@example.com").await.is_ok());
    }

    #[actix_web::test]
    async fn test_edit_changes_product_only_when_it_exists() {
        let (h, product_id) = seeded().await;
        let ctx = RequestContext::background();
        let seller = h.users.find_by_email(&ctx, "sam@example.com").await.unwrap().unwrap();
        let chair = h
            .products
            .save(&ctx, product("Office chair", seller.id.as_deref().unwrap()))
            .await
            .unwrap();
        let created = h
            .order_service
            .create(&ctx, order_for(&product_id), "bob@example.com")
            .await
            .unwrap();

        let missing = h
            .order_service
            .edit(
                &ctx,
                &created.id,
                UpdateOrderRequest {
                    product_id: Some("ffffffffffffffffffffffff".to_string()),
                },
                "bob@example.com",
            )
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let updated = h
            .order_service
            .edit(
                &ctx,
                &created.id,
                UpdateOrderRequest {
                    product_id: chair.id.clone(),
                },
                "bob@example.com",
            )
            .await
            .unwrap();
        assert_eq!(Some(updated.product_id), chair.id);
        assert_eq!(updated.user_id, created.user_id);
    }

    #[actix_web::test]
    async fn test_delete_own_order() {
        let (h, product_id) = seeded().await;
        let ctx = RequestContext::background();
        let created = h
            .order_service
            .create(&ctx, order_for(&product_id), "bob@example.com")
            .await
            .unwrap();

        h.order_service
            .delete(&ctx, &created.id, "bob@example.com")
            .await
            .unwrap();

        let again = h.order_service.delete(&ctx, &created.id, "bob@example.com").await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
        assert!(h.order_service.get_all(&ctx).await.unwrap().is_empty());
    }
}
