//! # 사용자 서비스
//!
//! 가입, 로그인, 프로필 조회/수정, 계정 삭제를 담당합니다.
//!
//! ## 계정 삭제 순서
//!
//! ```text
//! 1. 사용자가 낸 주문 삭제
//! 2. 사용자 상품을 참조하는 주문 삭제 (다른 사용자의 주문 포함)
//! 3. 사용자가 등록한 상품 삭제
//! 4. 사용자 삭제
//! ```
//!
//! 어느 단계든 실패하면 그 에러를 그대로 반환하고 이후 단계는 실행하지 않습니다.
//! 이미 끝난 단계는 되돌리지 않습니다.

use bcrypt::{hash, verify};
use std::sync::Arc;
use std::time::Instant;

use crate::core::{AppError, AppResult, ErrorContext, RequestContext};
use crate::domain::dto::users::{
    AuthResponse, CreateUserRequest, LoginRequest, UpdateUserRequest, UpdateUserResponse,
    UserResponse,
};
use crate::domain::entities::now_millis;
use crate::domain::entities::users::{Role, User};
use crate::repositories::orders::OrderRepository;
use crate::repositories::products::ProductRepository;
use crate::repositories::users::UserRepository;
use crate::services::auth::TokenService;
use crate::services::ownership::{ensure_owner, resolve_principal};
use crate::utils::validation::validate_request;

/// 사용자 관리 비즈니스 로직 서비스
///
/// 저장소와 토큰 코덱은 모두 생성 시 주입됩니다.
///
/// ```rust,ignore
/// let service = UserService::new(users, products, orders, tokens, PasswordConfig::bcrypt_cost());
/// let auth = service.register(&ctx, request, Role::User).await?;
/// ```
pub struct UserService {
    users: Arc<dyn UserRepository>,
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        tokens: Arc<TokenService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            products,
            orders,
            tokens,
            bcrypt_cost,
        }
    }

    /// 새 계정을 만들고 액세스 토큰을 발급합니다.
    ///
    /// 역할은 라우트가 정하며 `admin`은 가입으로 만들 수 없습니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 입력 검증 실패, 또는 `admin` 역할 요청
    /// * `ConflictError` - 이미 사용 중인 이메일
    pub async fn register(
        &self,
        ctx: &RequestContext,
        request: CreateUserRequest,
        role: Role,
    ) -> AppResult<AuthResponse> {
        let start_time = Instant::now();

        validate_request(&request)?;

        if role == Role::Admin {
            return Err(AppError::ValidationError(
                "관리자 계정은 가입으로 만들 수 없습니다".to_string(),
            ));
        }

        if self.users.find_by_email(ctx, &request.email).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 이메일입니다".to_string(),
            ));
        }

        let password_hash = self.hash_password(&request.password)?;

        let user = User::new(request.username, request.email, password_hash, role);
        let created = self.users.save(ctx, user).await?;

        let access_token = self.tokens.issue(&created.email)?;

        log::info!(
            "사용자 가입 완료: {} ({}) - {:?}",
            created.email,
            created.role,
            start_time.elapsed()
        );

        Ok(AuthResponse::new(
            created,
            access_token,
            self.tokens.expires_in(),
        ))
    }

    /// 이메일/비밀번호를 확인하고 액세스 토큰을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `PrincipalNotFound` - 등록되지 않은 이메일
    /// * `PasswordMismatch` - 비밀번호 불일치
    ///
    /// 두 경우 모두 HTTP 응답은 같은 401입니다.
    pub async fn login(&self, ctx: &RequestContext, request: LoginRequest) -> AppResult<AuthResponse> {
        let start_time = Instant::now();

        validate_request(&request)?;

        let user = self
            .users
            .find_by_email(ctx, &request.email)
            .await?
            .ok_or_else(|| AppError::PrincipalNotFound(request.email.clone()))?;

        let verify_start = Instant::now();
        let is_valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(AppError::PasswordMismatch);
        }

        let access_token = self.tokens.issue(&user.email)?;

        log::debug!("Total login took: {:?}", start_time.elapsed());

        Ok(AuthResponse::new(user, access_token, self.tokens.expires_in()))
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<UserResponse> {
        let user = self
            .users
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn get_all(&self, ctx: &RequestContext) -> AppResult<Vec<UserResponse>> {
        let users = self.users.find(ctx).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 본인 프로필을 부분 수정합니다.
    ///
    /// - 빈 사용자명/이메일/비밀번호는 기존 값을 유지합니다.
    /// - 비밀번호가 있으면 다시 해싱합니다.
    /// - 역할은 바뀌지 않습니다.
    /// - 이메일이 바뀌면 새 이메일로 토큰을 다시 발급합니다.
    pub async fn edit(
        &self,
        ctx: &RequestContext,
        id: &str,
        request: UpdateUserRequest,
        acting_email: &str,
    ) -> AppResult<UpdateUserResponse> {
        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;

        let target = self
            .users
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        ensure_owner(&principal, target.id.as_deref().unwrap_or(id), "사용자")?;

        validate_request(&request)?;

        let mut updated = target.clone();

        if let Some(username) = &request.username {
            updated.username = username.clone();
        }

        let mut email_changed = false;
        if let Some(email) = &request.email {
            if *email != target.email {
                if self.users.find_by_email(ctx, email).await?.is_some() {
                    return Err(AppError::ConflictError(
                        "이미 사용 중인 이메일입니다".to_string(),
                    ));
                }
                updated.email = email.clone();
                email_changed = true;
            }
        }

        if let Some(password) = request.new_password() {
            updated.password_hash = self.hash_password(password)?;
        }

        updated.updated_at = now_millis();

        let saved = self
            .users
            .update_one(ctx, id, updated)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let access_token = if email_changed {
            log::info!("이메일 변경으로 토큰 재발급: {} → {}", target.email, saved.email);
            Some(self.tokens.issue(&saved.email)?)
        } else {
            None
        };

        Ok(UpdateUserResponse {
            user: UserResponse::from(saved),
            access_token,
        })
    }

    /// 본인 계정과 그에 딸린 상품/주문을 삭제합니다.
    pub async fn delete(&self, ctx: &RequestContext, id: &str, acting_email: &str) -> AppResult<()> {
        let principal = resolve_principal(self.users.as_ref(), ctx, acting_email).await?;

        let target = self
            .users
            .find_by_id(ctx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        ensure_owner(&principal, target.id.as_deref().unwrap_or(id), "사용자")?;

        let removed_orders = self.orders.delete_all_by_user(ctx, id).await?;
        log::debug!("사용자 주문 삭제: {}건", removed_orders.len());

        let owned_products = self.products.find_by_creator(ctx, id).await?;
        for product in &owned_products {
            if let Some(product_id) = &product.id {
                let removed = self.orders.delete_all_by_product(ctx, product_id).await?;
                log::debug!("상품 {} 주문 삭제: {}건", product_id, removed.len());
            }
        }

        let removed_products = self.products.delete_all_by_user(ctx, id).await?;
        log::debug!("사용자 상품 삭제: {}건", removed_products.len());

        if !self.users.delete_one(ctx, id).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("사용자 삭제 완료: {}", target.email);
        Ok(())
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let hash_start = Instant::now();
        let password_hash = hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")?;
        log::info!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::orders::CreateOrderRequest;
    use crate::testing::{Harness, order, product};

    fn signup(username: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_register_then_login_issues_token_for_email() {
        let h = Harness::new();
        let ctx = RequestContext::background();

        let registered = h
            .user_service
            .register(&ctx, signup("alice", "alice@example.com", "secret1"), Role::User)
            .await
            .unwrap();
        assert_eq!(registered.user.role, Role::User);

        let logged_in = h
            .user_service
            .login(&ctx, login_request("alice@example.com", "secret1"))
            .await
            .unwrap();

        let claims = h.tokens.verify(&logged_in.access_token).unwrap();
        assert_eq!(claims.email(), "alice@example.com");
        assert_eq!(logged_in.token_type, "Bearer");
    }

    #[actix_web::test]
    async fn test_login_with_wrong_password_is_mismatch() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        h.user_service
            .register(&ctx, signup("alice", "alice@example.com", "secret1"), Role::User)
            .await
            .unwrap();

        let result = h
            .user_service
            .login(&ctx, login_request("alice@example.com", "wrong-one"))
            .await;

        assert!(matches!(result, Err(AppError::PasswordMismatch)));
    }

    #[actix_web::test]
    async fn test_login_with_unknown_email_is_principal_not_found() {
        let h = Harness::new();
        let ctx = RequestContext::background();

        let result = h
            .user_service
            .login(&ctx, login_request("ghost@example.com", "secret1"))
            .await;

        assert!(matches!(result, Err(AppError::PrincipalNotFound(_))));
    }

    #[actix_web::test]
    async fn test_register_rejects_duplicate_email_and_admin_role() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        h.user_service
            .register(&ctx, signup("alice", "alice@example.com", "secret1"), Role::User)
            .await
            .unwrap();

        let duplicate = h
            .user_service
            .register(&ctx, signup("alice2", "alice@example.com", "secret2"), Role::Seller)
            .await;
        assert!(matches!(duplicate, Err(AppError::ConflictError(_))));

        let admin = h
            .user_service
            .register(&ctx, signup("root", "root@example.com", "secret1"), Role::Admin)
            .await;
        assert!(matches!(admin, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_register_validates_input() {
        let h = Harness::new();
        let ctx = RequestContext::background();

        let result = h
            .user_service
            .register(&ctx, signup("alice", "not-an-email", "abc"), Role::User)
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(h.users.len(), 0);
    }

    #[actix_web::test]
    async fn test_edit_keeps_hash_and_role_when_password_empty() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let seller = h.seed_user("sam", "sam@example.com", Role::Seller).await;
        let id = seller.id.clone().unwrap();

        let request = UpdateUserRequest {
            username: Some("samuel".to_string()),
            email: None,
            password: Some(String::new()),
        };
        let response = h
            .user_service
            .edit(&ctx, &id, request, "sam@example.com")
            .await
            .unwrap();

        assert_eq!(response.user.username, "samuel");
        assert_eq!(response.user.role, Role::Seller);
        assert!(response.access_token.is_none());

        let stored = h.users.find_by_id(&ctx, &id).await.unwrap().unwrap();
        assert_eq!(stored.password_hash, seller.password_hash);
    }

    #[actix_web::test]
    async fn test_edit_rehashes_new_password() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let registered = h
            .user_service
            .register(&ctx, signup("alice", "alice@example.com", "secret1"), Role::User)
            .await
            .unwrap();

        let request = UpdateUserRequest {
            password: Some("brand-new".to_string()),
            ..Default::default()
        };
        h.user_service
            .edit(&ctx, &registered.user.id, request, "alice@example.com")
            .await
            .unwrap();

        let old = h
            .user_service
            .login(&ctx, login_request("alice@example.com", "secret1"))
            .await;
        assert!(matches!(old, Err(AppError::PasswordMismatch)));
        assert!(
            h.user_service
                .login(&ctx, login_request("alice@example.com", "brand-new"))
                .await
                .is_ok()
        );
    }

    #[actix_web::test]
    async fn test_email_change_reissues_token_for_new_email() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let alice = h.seed_user("alice", "alice@example.com", Role::User).await;

        let request = UpdateUserRequest {
            email: Some("alice@new.example.com".to_string()),
            ..Default::default()
        };
        let response = h
            .user_service
            .edit(&ctx, alice.id.as_deref().unwrap(), request, "alice@example.com")
            .await
            .unwrap();

        let token = response.access_token.unwrap();
        assert_eq!(h.tokens.verify(&token).unwrap().email(), "alice@new.example.com");
        assert_eq!(response.user.email, "alice@new.example.com");
    }

    #[actix_web::test]
    async fn test_email_change_to_taken_email_conflicts() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let alice = h.seed_user("alice", "alice@example.com", Role::User).await;
        h.seed_user("bob", "bob@example.com", Role::User).await;

        let request = UpdateUserRequest {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        let result = h
            .user_service
            .edit(&ctx, alice.id.as_deref().unwrap(), request, "alice@example.com")
            .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_edit_other_user_is_forbidden_even_for_admin() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let alice = h.seed_user("alice", "alice@example.com", Role::User).await;
        h.seed_user("root", "root@example.com", Role::Admin).await;

        let result = h
            .user_service
            .edit(
                &ctx,
                alice.id.as_deref().unwrap(),
                UpdateUserRequest::default(),
                "root@example.com",
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[actix_web::test]
    async fn test_edit_missing_user_is_not_found() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        h.seed_user("alice", "alice@example.com", Role::User).await;

        let result = h
            .user_service
            .edit(&ctx, "ffffffffffffffffffffffff", UpdateUserRequest::default(), "alice@example.com")
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_delete_cascades_orders_then_products_then_user() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let seller = h.seed_user("sam", "sam@example.com", Role::Seller).await;
        let buyer = h.seed_user("bob", "bob@example.com", Role::User).await;
        let seller_id = seller.id.clone().unwrap();
        let buyer_id = buyer.id.clone().unwrap();

        let lamp = h
            .products
            .save(&ctx, product("Desk lamp", &seller_id))
            .await
            .unwrap();
        let lamp_id = lamp.id.clone().unwrap();
        let other = h
            .products
            .save(&ctx, product("Other shop item", &buyer_id))
            .await
            .unwrap();
        h.orders.save(&ctx, order(&seller_id, other.id.as_deref().unwrap())).await.unwrap();
        h.orders.save(&ctx, order(&buyer_id, &lamp_id)).await.unwrap();
        let survivor = h
            .orders
            .save(&ctx, order(&buyer_id, other.id.as_deref().unwrap()))
            .await
            .unwrap();

        h.user_service
            .delete(&ctx, &seller_id, "sam@example.com")
            .await
            .unwrap();

        assert!(h.users.find_by_id(&ctx, &seller_id).await.unwrap().is_none());
        assert!(h.products.find_by_id(&ctx, &lamp_id).await.unwrap().is_none());
        assert_eq!(h.products.len(), 1);
        assert_eq!(h.orders.find(&ctx).await.unwrap(), vec![survivor]);
    }

    #[actix_web::test]
    async fn test_delete_stops_at_first_failed_step() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let seller = h.seed_user("sam", "sam@example.com", Role::Seller).await;
        let seller_id = seller.id.clone().unwrap();
        h.products
            .save(&ctx, product("Desk lamp", &seller_id))
            .await
            .unwrap();

        h.orders.set_failing(true);
        let result = h.user_service.delete(&ctx, &seller_id, "sam@example.com").await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert_eq!(h.products.len(), 1);
        assert!(h.users.find_by_id(&ctx, &seller_id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_delete_other_user_is_forbidden() {
        let h = Harness::new();
        let ctx = RequestContext::background();
        let alice = h.seed_user("alice", "alice@example.com", Role::User).await;
        h.seed_user("bob", "bob@example.com", Role::User).await;

        let result = h
            .user_service
            .delete(&ctx, alice.id.as_deref().unwrap(), "bob@example.com")
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert_eq!(h.users.len(), 2);
    }

    #[actix_web::test]
    async fn test_delete_evicts_cached_user_products_and_orders() {
        let h = Harness::cached();
        let ctx = RequestContext::background();
        let seller = h.seed_user("sam", "sam@example.com", Role::Seller).await;
        let buyer = h.seed_user("bob", "bob@example.com", Role::User).await;
        let seller_id = seller.id.clone().unwrap();
        let buyer_id = buyer.id.clone().unwrap();

        let lamp = h
            .product_repo
            .save(&ctx, product("Desk lamp", &seller_id))
            .await
            .unwrap();
        let lamp_id = lamp.id.clone().unwrap();
        let placed = h
            .order_repo
            .save(&ctx, order(&buyer_id, &lamp_id))
            .await
            .unwrap();
        let order_id = placed.id.clone().unwrap();
        h.user_repo.find_by_email(&ctx, "sam@example.com").await.unwrap();
        h.product_repo.find(&ctx).await.unwrap();

        let keys = [
            format!("redisAdapter::user:{}", seller_id),
            "redisAdapter::user:sam@example.com".to_string(),
            format!("redisAdapter::product:{}", lamp_id),
            format!("redisAdapter::order:{}", order_id),
            "redisAdapter::products".to_string(),
        ];
        for key in &keys {
            assert!(h.cache.contains(key), "{} should be cached", key);
        }

        h.user_service
            .delete(&ctx, &seller_id, "sam@example.com")
            .await
            .unwrap();

        for key in &keys {
            assert!(!h.cache.contains(key), "{} should be evicted", key);
        }
        assert!(h.user_repo.find_by_email(&ctx, "sam@example.com").await.unwrap().is_none());
        assert!(h.product_repo.find_by_id(&ctx, &lamp_id).await.unwrap().is_none());
        assert!(h.order_repo.find_by_id(&ctx, &order_id).await.unwrap().is_none());
        assert!(h.product_repo.find(&ctx).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_new_email_acts_and_old_email_is_gone_through_cache() {
        let h = Harness::cached();
        let ctx = RequestContext::background();
        let seller = h.seed_user("sam", "sam@example.com", Role::Seller).await;
        let alice = h.seed_user("alice", "alice@example.com", Role::User).await;
        let alice_id = alice.id.clone().unwrap();
        let lamp = h
            .product_repo
            .save(&ctx, product("Desk lamp", seller.id.as_deref().unwrap()))
            .await
            .unwrap();
        let order_for_lamp = || CreateOrderRequest {
            product_id: lamp.id.clone().unwrap(),
        };

        h.order_service
            .create(&ctx, order_for_lamp(), "alice@example.com")
            .await
            .unwrap();
        assert!(h.cache.contains("redisAdapter::user:alice@example.com"));

        let request = UpdateUserRequest {
            email: Some("alice@new.example.com".to_string()),
            ..Default::default()
        };
        h.user_service
            .edit(&ctx, &alice_id, request, "alice@example.com")
            .await
            .unwrap();
        assert!(!h.cache.contains("redisAdapter::user:alice@example.com"));

        let placed = h
            .order_service
            .create(&ctx, order_for_lamp(), "alice@new.example.com")
            .await
            .unwrap();
        assert_eq!(placed.user_id, alice_id);

        let stale = h
            .order_service
            .create(&ctx, order_for_lamp(), "alice@example.com")
            .await;
        assert!(matches!(stale, Err(AppError::PrincipalNotFound(_))));

        let renamed = UpdateUserRequest {
            username: Some("alicia".to_string()),
            ..Default::default()
        };
        let response = h
            .user_service
            .edit(&ctx, &alice_id, renamed, "alice@new.example.com")
            .await
            .unwrap();
        assert_eq!(response.user.username, "alicia");
        assert_eq!(response.user.email, "alice@new.example.com");
    }
}
