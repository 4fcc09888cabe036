//! # 상품 서비스
//!
//! 등록자는 항상 인증된 사용자로 기록되며 등록자 본인만 수정/삭제할 수 있습니다.
//! 상품을 삭제하면 그 상품을 참조하는 주문이 먼저 삭제됩니다.

use std::sync::Arc;

use crate::core::{AppError, AppResult, RequestContext};
use crate::domain::dto::products::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::domain::entities::now_millis;
use crate::domain::entities::products::Product;
use crate::repositories::orders::OrderRepository;
use crate::repositories::products::ProductRepository;
use crate::repositories::users::UserRepository;
use crate::services::ownership::{ensure_owner, resolve_principal};
use crate::utils::validation::validate_request;

pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            products,
            orders,
            users,
        }
    }

    /// 상품을 등록합니다. `created_by`는 인증된 사용자 ID로 채워집니다.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateProductRequest,
        acting_email: &str,
    ) -> AppResult<ProductResponse> {
        validate_request(&request)?;

        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;

        let product = Product::new(request.title, request.price, request.detail, principal.id);
        let created = self.products.save(ctx, product).await?;

        log::info!("상품 등록: {:?} by {}", created.id, acting_email);
        Ok(ProductResponse::from(created))
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<ProductResponse> {
        let product = self.find_product(ctx, id).await?;
        Ok(ProductResponse::from(product))
    }

    pub async fn get_all(&self, ctx: &RequestContext) -> AppResult<Vec<ProductResponse>> {
        let products = self.products.find(ctx).await?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    /// 상품을 부분 수정합니다.
    ///
    /// 기존 값과 병합한 결과를 등록 시와 같은 규칙으로 검증합니다.
    pub async fn edit(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: UpdateProductRequest,
        acting_email: &str,
    ) -> AppResult<ProductResponse> {
        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;
        let target = self.find_product(ctx, id).await?;
        ensure_owner(&principal, &target.created_by, "상품")?;

        let mut updated = target;
        if let Some(price) = request.new_price() {
            updated.price = price;
        }
        if let Some(title) = request.title {
            updated.title = title;
        }
        if let Some(detail) = request.detail {
            updated.detail = detail;
        }

        validate_request(&CreateProductRequest {
            title: updated.title.clone(),
            price: updated.price,
            detail: updated.detail.clone(),
        })?;

        updated.updated_at = now_millis();

        let saved = self
            .products
            .update_one(ctx, id, updated)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;

        Ok(ProductResponse::from(saved))
    }

    /// 상품과 그 상품을 참조하는 주문을 삭제합니다.
    pub async fn delete(&self, ctx: &RequestContext, id: &str, acting_email: &str) -> AppResult<()> {
        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;
        let target = self.find_product(ctx, id).await?;
        ensure_owner(&principal, &target.created_by, "상품")?;

        let removed = self.orders.delete_all_by_product(ctx, id).await?;
        log::debug!("상품 {} 주문 삭제: {}건", id, removed.len());

        if !self.products.delete_one(ctx, id).await? {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }

        log::info!("상품 삭제: {} by {}", id, acting_email);
        Ok(())
    }

    async fn find_product(&self, ctx: &RequestContext, id: &str) -> AppResult<Product> {
        self.products
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }
}
