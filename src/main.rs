//! 쇼핑 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 조립합니다.
//! MongoDB, Redis 연결을 설정하고 저장소를 캐시 데코레이터로 감싼 뒤
//! 서비스와 요청 게이트를 `app_data`로 등록합니다.

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use shop_service_backend::caching::{CacheStore, RedisClient};
use shop_service_backend::config::{CacheConfig, JwtConfig, PasswordConfig, ServerConfig};
use shop_service_backend::core::AppError;
use shop_service_backend::db::Database;
use shop_service_backend::middlewares::RequestGate;
use shop_service_backend::repositories::CacheAside;
use shop_service_backend::repositories::orders::{
    CachedOrderRepository, MongoOrderRepository, OrderRepository,
};
use shop_service_backend::repositories::products::{
    CachedProductRepository, MongoProductRepository, ProductRepository,
};
use shop_service_backend::repositories::users::{
    CachedUserRepository, MongoUserRepository, UserRepository,
};
use shop_service_backend::routes::configure_all_routes;
use shop_service_backend::services::auth::{RoleAuthorizer, TokenService};
use shop_service_backend::services::orders::OrderService;
use shop_service_backend::services::products::ProductService;
use shop_service_backend::services::users::UserService;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

/// 조립이 끝난 애플리케이션 상태
struct AppState {
    gate: web::Data<RequestGate>,
    users: web::Data<UserService>,
    products: web::Data<ProductService>,
    orders: web::Data<OrderService>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 쇼핑 서비스 시작중...");

    let state = build_state().await.map_err(|e| {
        error!("서비스 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// 저장소, 캐시, 서비스를 생성자 주입으로 조립합니다.
///
/// 인가기는 캐시를 거치지 않는 사용자 저장소를 받아 역할을 항상 새로 읽습니다.
async fn build_state() -> Result<AppState, AppError> {
    info!("📡 데이터베이스 연결 중...");
    let database = Database::new()
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;
    info!("✅ MongoDB 연결 성공 ({})", database.database_name());

    let mongo_users = MongoUserRepository::new(&database);
    let mongo_products = MongoProductRepository::new(&database);
    let mongo_orders = MongoOrderRepository::new(&database);

    mongo_users.create_indexes().await?;
    mongo_products.create_indexes().await?;
    mongo_orders.create_indexes().await?;

    let raw_users: Arc<dyn UserRepository> = Arc::new(mongo_users);
    let raw_products: Arc<dyn ProductRepository> = Arc::new(mongo_products);
    let raw_orders: Arc<dyn OrderRepository> = Arc::new(mongo_orders);

    let (users, products, orders) = if CacheConfig::enabled() {
        let client = RedisClient::new()
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;
        let redis: Arc<dyn CacheStore> = Arc::new(client);
        info!("✅ Redis 연결 성공");

        let cache = || {
            CacheAside::new(
                redis.clone(),
                CacheConfig::namespace(),
                CacheConfig::ttl_seconds(),
            )
        };

        let users: Arc<dyn UserRepository> =
            Arc::new(CachedUserRepository::new(raw_users.clone(), cache()));
        let products: Arc<dyn ProductRepository> =
            Arc::new(CachedProductRepository::new(raw_products, cache()));
        let orders: Arc<dyn OrderRepository> =
            Arc::new(CachedOrderRepository::new(raw_orders, cache()));

        (users, products, orders)
    } else {
        warn!("⚠️ CACHE_ENABLED=false: 캐시 없이 MongoDB만 사용합니다");
        (raw_users.clone(), raw_products, raw_orders)
    };

    let tokens = Arc::new(TokenService::new(JwtConfig::secret().as_bytes()));
    let authorizer = Arc::new(RoleAuthorizer::new(raw_users));
    let gate = RequestGate::new(tokens.clone(), authorizer);

    let user_service = UserService::new(
        users.clone(),
        products.clone(),
        orders.clone(),
        tokens,
        PasswordConfig::bcrypt_cost(),
    );
    let product_service = ProductService::new(products.clone(), orders.clone(), users.clone());
    let order_service = OrderService::new(orders, products, users);

    Ok(AppState {
        gate: web::Data::new(gate),
        users: web::Data::new(user_service),
        products: web::Data::new(product_service),
        orders: web::Data::new(order_service),
    })
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!(
        "⏱️ 요청 기한: {:?}",
        Duration::from_secs(ServerConfig::request_timeout_secs())
    );

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    let AppState {
        gate,
        users,
        products,
        orders,
    } = state;

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(gate.clone())
            .app_data(users.clone())
            .app_data(products.clone())
            .app_data(orders.clone())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기준으로 로깅을 초기화합니다. 기본값은 `info,actix_web=debug`.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
