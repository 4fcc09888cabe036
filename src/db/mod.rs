//! MongoDB 연결
//!
//! 상품, 주문, 사용자 컬렉션이 모두 같은 데이터베이스를 공유합니다.
//! 리포지토리는 [`Database::collection`]으로 타입이 지정된 컬렉션 핸들을 받습니다.
//!
//! | 환경 변수 | 기본값 |
//! |-----------|--------|
//! | `MONGODB_URI` | `mongodb://localhost:27017` |
//! | `DATABASE_NAME` | `shop_dev` |
//! | `MONGODB_SELECT_TIMEOUT_SECS` | `5` |
//!
//! ```rust,ignore
//! let database = Database::new().await?;
//! let orders = MongoOrderRepository::new(&database);
//! orders.create_indexes().await?;
//! ```

use std::env;
use std::time::Duration;

use log::{debug, info};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

const APP_NAME: &str = "shop_service";

/// 연결된 MongoDB 핸들. 복제 비용이 낮아 리포지토리마다 하나씩 나눠 가집니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 변수로 클라이언트를 만들고 `ping`이 성공해야 반환합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "shop_dev".to_string());
        let select_timeout = env::var("MONGODB_SELECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5);

        let mut options = ClientOptions::parse(&uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(Duration::from_secs(select_timeout));

        let database = Self {
            client: Client::with_options(options)?,
            database_name,
        };
        database.ping().await?;

        info!("MongoDB 준비 완료: {}", database.database_name);
        Ok(database)
    }

    async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.get_database().run_command(doc! { "ping": 1 }).await?;
        debug!("MongoDB ping OK");
        Ok(())
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 엔티티 타입이 지정된 컬렉션 핸들
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.get_database().collection::<T>(name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
