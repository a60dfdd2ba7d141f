////////////////////////////////////////////////////////////////////////
//
// 1. 每个Domain(Entity)单独一个文件夹
// 2. 每个Domain由两部分组成:
//    - model: 定义Schema
//    - repository: 实际的数据库底层操作
//
//////////////////////////////////////////////////////////////////////

use mongodb::{bson::doc, options::IndexOptions, Client, Collection, IndexModel};
use std::sync::Arc;
use tracing::info;
use utils::{AppConfig, AppResult};

pub mod serde_helpers;
pub mod user;

pub use user::model::{User, UserRecord};
pub use user::repository::{DynUserRepository, InMemoryUserRepository, UserRepositoryTrait};

/// 注册流程写入的集合名（与报名站点共用）
pub const USERS_COLLECTION: &str = "users";

#[derive(Clone, Debug)]
pub struct Database {
    pub users: Collection<User>,
}

impl Database {
    pub async fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let db: mongodb::Database = client.database(&config.mongo_db);

        let users = db.collection(USERS_COLLECTION);

        info!("🧱 database({:#}) connected.", &config.mongo_db);

        Ok(Database { users })
    }

    /// 初始化用户集合索引
    ///
    /// email / referralCode / apiKey 唯一，position 用于列表排序
    pub async fn init_indexes(&self) -> AppResult<()> {
        info!("🔧 初始化User数据库索引...");

        let unique = || IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder().keys(doc! { "email": 1 }).options(unique()).build(),
            IndexModel::builder().keys(doc! { "referralCode": 1 }).options(unique()).build(),
            IndexModel::builder().keys(doc! { "apiKey": 1 }).options(unique()).build(),
            IndexModel::builder().keys(doc! { "position": 1 }).build(),
        ];

        self.users.create_indexes(indexes, None).await?;
        info!("✅ User数据库索引初始化完成");
        Ok(())
    }
}
