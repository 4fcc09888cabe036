//! 테스트 전용 인메모리 저장소와 캐시
//!
//! MongoDB, Redis 없이 서비스와 데코레이터를 검증하기 위한 대역입니다.
//! 각 저장소는 호출 횟수를 세고 `set_failing(true)`로 저장소 장애를 흉내냅니다.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::caching::CacheStore;
use crate::core::{AppError, AppResult, RequestContext};
use crate::domain::entities::{Order, Product, Role, User};
use crate::middlewares::RequestGate;
use crate::repositories::CacheAside;
use crate::repositories::orders::{CachedOrderRepository, OrderRepository};
use crate::repositories::products::{CachedProductRepository, ProductRepository};
use crate::repositories::users::{CachedUserRepository, UserRepository};
use crate::services::auth::{RoleAuthorizer, TokenService};
use crate::services::orders::OrderService;
use crate::services::products::ProductService;
use crate::services::users::UserService;

pub const TEST_SECRET: &[u8] = b"test-secret-key-with-enough-bytes";

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// ObjectId 모양의 24자리 16진수 ID
fn next_id() -> String {
    format!("{:024x}", NEXT_ID.fetch_add(1, Ordering::SeqCst))
}

fn store_down() -> AppError {
    AppError::DatabaseError("store unavailable".to_string())
}

/// 공통 호출 계수기와 장애 스위치
#[derive(Default)]
struct Switch {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl Switch {
    fn enter(&self) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(store_down())
        } else {
            Ok(())
        }
    }
}

pub fn user(username: &str, email: &str, role: Role) -> User {
    User::new(
        username.to_string(),
        email.to_string(),
        "$2b$04$placeholderplaceholderplaceholderplaceholderpla".to_string(),
        role,
    )
}

pub fn product(title: &str, owner: &str) -> Product {
    Product::new(
        title.to_string(),
        10.0,
        "A sturdy, well-made item".to_string(),
        owner.to_string(),
    )
}

pub fn order(user_id: &str, product_id: &str) -> Order {
    Order::new(user_id.to_string(), product_id.to_string())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
    switch: Switch,
    find_by_id_calls: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.switch.failing.store(failing, Ordering::SeqCst);
    }

    /// 모든 메서드 호출 횟수
    pub fn calls(&self) -> usize {
        self.switch.calls.load(Ordering::SeqCst)
    }

    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, _ctx: &RequestContext, mut user: User) -> AppResult<User> {
        self.switch.enter()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("duplicate email".to_string()));
        }
        user.id = Some(next_id());
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: &str) -> AppResult<Option<User>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.switch.enter()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.id.as_deref() == Some(id)).cloned())
    }

    async fn find_by_email(&self, _ctx: &RequestContext, email: &str) -> AppResult<Option<User>> {
        self.switch.enter()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find(&self, _ctx: &RequestContext) -> AppResult<Vec<User>> {
        self.switch.enter()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn update_one(
        &self,
        _ctx: &RequestContext,
        id: &str,
        mut user: User,
    ) -> AppResult<Option<User>> {
        self.switch.enter()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id.as_deref() == Some(id)) {
            Some(row) => {
                user.id = Some(id.to_string());
                *row = user.clone();
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn delete_one(&self, _ctx: &RequestContext, id: &str) -> AppResult<bool> {
        self.switch.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id.as_deref() != Some(id));
        Ok(rows.len() < before)
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryProductRepository {
    rows: Mutex<Vec<Product>>,
    switch: Switch,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.switch.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.switch.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, _ctx: &RequestContext, mut product: Product) -> AppResult<Product> {
        self.switch.enter()?;
        product.id = Some(next_id());
        self.rows.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: &str) -> AppResult<Option<Product>> {
        self.switch.enter()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id.as_deref() == Some(id)).cloned())
    }

    async fn find(&self, _ctx: &RequestContext) -> AppResult<Vec<Product>> {
        self.switch.enter()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_creator(&self, _ctx: &RequestContext, user_id: &str) -> AppResult<Vec<Product>> {
        self.switch.enter()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| p.is_owned_by(user_id)).cloned().collect())
    }

    async fn update_one(
        &self,
        _ctx: &RequestContext,
        id: &str,
        mut product: Product,
    ) -> AppResult<Option<Product>> {
        self.switch.enter()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id.as_deref() == Some(id)) {
            Some(row) => {
                product.id = Some(id.to_string());
                *row = product.clone();
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    async fn delete_one(&self, _ctx: &RequestContext, id: &str) -> AppResult<bool> {
        self.switch.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id.as_deref() != Some(id));
        Ok(rows.len() < before)
    }

    async fn delete_all_by_user(&self, _ctx: &RequestContext, user_id: &str) -> AppResult<Vec<String>> {
        self.switch.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let removed = rows
            .iter()
            .filter(|p| p.is_owned_by(user_id))
            .filter_map(|p| p.id.clone())
            .collect();
        rows.retain(|p| !p.is_owned_by(user_id));
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryOrderRepository {
    rows: Mutex<Vec<Order>>,
    switch: Switch,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.switch.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.switch.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn remove_where(&self, keep: impl Fn(&Order) -> bool) -> Vec<String> {
        let mut rows = self.rows.lock().unwrap();
        let removed = rows
            .iter()
            .filter(|o| !keep(o))
            .filter_map(|o| o.id.clone())
            .collect();
        rows.retain(|o| keep(o));
        removed
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, _ctx: &RequestContext, mut order: Order) -> AppResult<Order> {
        self.switch.enter()?;
        order.id = Some(next_id());
        self.rows.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, _ctx: &RequestContext, id: &str) -> AppResult<Option<Order>> {
        self.switch.enter()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|o| o.id.as_deref() == Some(id)).cloned())
    }

    async fn find(&self, _ctx: &RequestContext) -> AppResult<Vec<Order>> {
        self.switch.enter()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_user(&self, _ctx: &RequestContext, user_id: &str) -> AppResult<Vec<Order>> {
        self.switch.enter()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|o| o.is_owned_by(user_id)).cloned().collect())
    }

    async fn update_one(
        &self,
        _ctx: &RequestContext,
        id: &str,
        mut order: Order,
    ) -> AppResult<Option<Order>> {
        self.switch.enter()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|o| o.id.as_deref() == Some(id)) {
            Some(row) => {
                order.id = Some(id.to_string());
                *row = order.clone();
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    async fn delete_one(&self, _ctx: &RequestContext, id: &str) -> AppResult<bool> {
        self.switch.enter()?;
        let removed = self.remove_where(|o| o.id.as_deref() != Some(id));
        Ok(!removed.is_empty())
    }

    async fn delete_all_by_user(&self, _ctx: &RequestContext, user_id: &str) -> AppResult<Vec<String>> {
        self.switch.enter()?;
        Ok(self.remove_where(|o| !o.is_owned_by(user_id)))
    }

    async fn delete_all_by_product(
        &self,
        _ctx: &RequestContext,
        product_id: &str,
    ) -> AppResult<Vec<String>> {
        self.switch.enter()?;
        Ok(self.remove_where(|o| o.product_id != product_id))
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// TTL은 기록만 하고 만료시키지 않습니다. 취소된 컨텍스트의 호출은 거부합니다.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Option<u64>)>>,
    failing: AtomicBool,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
    del_calls: AtomicUsize,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), None));
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).and_then(|(_, ttl)| *ttl)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn del_calls(&self) -> usize {
        self.del_calls.load(Ordering::SeqCst)
    }

    fn check(&self, ctx: &RequestContext) -> AppResult<()> {
        if ctx.is_cancelled() {
            return Err(AppError::Cancelled("cancelled".to_string()));
        }
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::RedisError("cache unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get_string(&self, ctx: &RequestContext, key: &str) -> AppResult<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check(ctx)?;
        Ok(self.get_raw(key))
    }

    async fn set_with_expiry(
        &self,
        ctx: &RequestContext,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> AppResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.check(ctx)?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Some(seconds)));
        Ok(())
    }

    async fn del(&self, ctx: &RequestContext, key: &str) -> AppResult<()> {
        self.del_calls.fetch_add(1, Ordering::SeqCst);
        self.check(ctx)?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn del_multiple(&self, ctx: &RequestContext, keys: &[String]) -> AppResult<()> {
        self.del_calls.fetch_add(1, Ordering::SeqCst);
        self.check(ctx)?;
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// 인메모리 저장소 위에 조립한 서비스 묶음
///
/// `users`/`products`/`orders`는 원본 저장소이고, 서비스는 `*_repo`를 통해 접근합니다.
/// [`Harness::cached`]는 `main`과 같이 원본 위에 캐시 데코레이터를 씌웁니다.
pub struct Harness {
    pub users: Arc<InMemoryUserRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub orders: Arc<InMemoryOrderRepository>,
    pub cache: Arc<InMemoryCache>,
    pub user_repo: Arc<dyn UserRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
    pub tokens: Arc<TokenService>,
    pub gate: Arc<RequestGate>,
    pub user_service: Arc<UserService>,
    pub product_service: Arc<ProductService>,
    pub order_service: Arc<OrderService>,
}

impl Harness {
    /// 캐시 없이 원본 저장소에 바로 연결
    pub fn new() -> Self {
        Self::build(false)
    }

    /// 원본 저장소 위에 `Cached*Repository`와 인메모리 캐시를 씌움
    pub fn cached() -> Self {
        Self::build(true)
    }

    fn build(with_cache: bool) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let products = Arc::new(InMemoryProductRepository::new());
        let orders = Arc::new(InMemoryOrderRepository::new());
        let cache = Arc::new(InMemoryCache::new());
        let tokens = Arc::new(TokenService::new(TEST_SECRET));

        let (user_repo, product_repo, order_repo) = if with_cache {
            let aside = || CacheAside::new(cache.clone(), "redisAdapter", 120);
            let user_repo: Arc<dyn UserRepository> =
                Arc::new(CachedUserRepository::new(users.clone(), aside()));
            let product_repo: Arc<dyn ProductRepository> =
                Arc::new(CachedProductRepository::new(products.clone(), aside()));
            let order_repo: Arc<dyn OrderRepository> =
                Arc::new(CachedOrderRepository::new(orders.clone(), aside()));
            (user_repo, product_repo, order_repo)
        } else {
            let user_repo: Arc<dyn UserRepository> = users.clone();
            let product_repo: Arc<dyn ProductRepository> = products.clone();
            let order_repo: Arc<dyn OrderRepository> = orders.clone();
            (user_repo, product_repo, order_repo)
        };

        let authorizer = Arc::new(RoleAuthorizer::new(users.clone()));
        let gate = Arc::new(RequestGate::new(tokens.clone(), authorizer));

        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            product_repo.clone(),
            order_repo.clone(),
            tokens.clone(),
            4,
        ));
        let product_service = Arc::new(ProductService::new(
            product_repo.clone(),
            order_repo.clone(),
            user_repo.clone(),
        ));
        let order_service = Arc::new(OrderService::new(
            order_repo.clone(),
            product_repo.clone(),
            user_repo.clone(),
        ));

        Self {
            users,
            products,
            orders,
            cache,
            user_repo,
            product_repo,
            order_repo,
            tokens,
            gate,
            user_service,
            product_service,
            order_service,
        }
    }

    pub async fn seed_user(&self, username: &str, email: &str, role: Role) -> User {
        self.user_repo
            .save(&RequestContext::background(), user(username, email, role))
            .await
            .unwrap()
    }
}
