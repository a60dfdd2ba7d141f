use crate::{
    user::model::{User, UserListingDocument, UserRecord},
    Database,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{bson::doc, options::FindOptions};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use tracing::{error, info};
use utils::{AppError, AppResult};

pub type DynUserRepository = Arc<dyn UserRepositoryTrait + Send + Sync>;

/// 查询失败时返回给调用方的固定文案
pub const FETCH_USERS_FAILED: &str = "Failed to fetch users";

// 主要用于Service中，表示提供了该Trait功能
#[async_trait]
pub trait UserRepositoryTrait {
    /// 按 position 升序读取全部用户的列表投影
    ///
    /// 只读；游标完整读完才返回，失败时不返回部分结果
    async fn list_users_by_position(&self) -> AppResult<Vec<UserRecord>>;
}

#[async_trait]
impl UserRepositoryTrait for Database {
    async fn list_users_by_position(&self) -> AppResult<Vec<UserRecord>> {
        let options = FindOptions::builder()
            .projection(UserListingDocument::projection())
            .sort(doc! { "position": 1 })
            .build();

        let cursor = self
            .users
            .clone_with_type::<UserListingDocument>()
            .find(doc! {}, options)
            .await
            .map_err(store_unavailable)?;

        let documents: Vec<UserListingDocument> = cursor.try_collect().await.map_err(store_unavailable)?;

        let records = documents
            .into_iter()
            .map(UserRecord::try_from)
            .collect::<AppResult<Vec<_>>>()
            .map_err(store_unavailable)?;

        info!("📋 读取用户列表 {} 条", records.len());
        Ok(records)
    }
}

fn store_unavailable(err: impl std::fmt::Display) -> AppError {
    error!("❌ Failed to fetch users: {}", err);
    AppError::StoreUnavailable(FETCH_USERS_FAILED.to_string())
}

/// 内存版用户仓库，测试和本地演示使用
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            unavailable: AtomicBool::new(false),
        }
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }

    pub async fn replace_all(&self, users: Vec<User>) {
        *self.users.write().await = users;
    }

    /// 模拟存储不可达
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepositoryTrait for InMemoryUserRepository {
    async fn list_users_by_position(&self) -> AppResult<Vec<UserRecord>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(store_unavailable("in-memory store marked unavailable"));
        }

        let users = self.users.read().await;
        let mut records = users.iter().map(User::to_record).collect::<AppResult<Vec<_>>>()?;
        records.sort_by_key(|record| record.position);

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn user(position: i64, minutes: i64) -> User {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        User::new(
            &format!("user{}@example.com", position),
            &format!("REF{}", position),
            position,
            base + Duration::minutes(minutes),
        )
    }

    #[tokio::test]
    async fn test_in_memory_lists_by_position() {
        let repository = InMemoryUserRepository::new(vec![user(3, 1), user(1, 5), user(2, 3)]);

        let records = repository.list_users_by_position().await.unwrap();
        let positions: Vec<i64> = records.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_in_memory_unavailable() {
        let repository = InMemoryUserRepository::new(vec![user(1, 0)]);
        repository.set_unavailable(true);

        let err = repository.list_users_by_position().await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(ref msg) if msg == FETCH_USERS_FAILED));

        repository.set_unavailable(false);
        assert_eq!(repository.list_users_by_position().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_listing_is_read_only() {
        let repository = InMemoryUserRepository::new(vec![user(2, 0).with_counts(4, 9), user(1, 1)]);

        let first = repository.list_users_by_position().await.unwrap();
        let second = repository.list_users_by_position().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first[1].referral_count, 4);
        assert_eq!(first[1].link_visits, 9);
    }

    #[tokio::test]
    async fn test_insert_and_replace() {
        let repository = InMemoryUserRepository::default();
        assert!(repository.list_users_by_position().await.unwrap().is_empty());

        repository.insert(user(5, 0)).await;
        assert_eq!(repository.list_users_by_position().await.unwrap().len(), 1);

        repository.replace_all(vec![user(1, 0), user(2, 0)]).await;
        assert_eq!(repository.list_users_by_position().await.unwrap().len(), 2);
    }
}
