use crate::serde_helpers::{deserialize_counter, deserialize_integer, serialize_i64_as_number, serialize_u64_as_number};
use chrono::prelude::{DateTime, TimeZone, Utc};
use mongodb::bson::{self, doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use utils::{AppError, AppResult};
use utoipa::ToSchema;

/// 用户模型（报名站点写入的完整文档）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// MongoDB文档ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 邮箱（唯一）
    pub email: String,
    /// 推荐码（唯一）
    pub referral_code: String,
    /// 推荐人的推荐码
    #[serde(default)]
    pub referred_by: Option<String>,
    #[serde(default, serialize_with = "serialize_u64_as_number", deserialize_with = "deserialize_counter")]
    pub referral_count: u64,
    #[serde(default, serialize_with = "serialize_u64_as_number", deserialize_with = "deserialize_counter")]
    pub link_visits: u64,
    /// 报名顺序，创建时分配后不再修改
    #[serde(serialize_with = "serialize_i64_as_number", deserialize_with = "deserialize_integer")]
    pub position: i64,
    #[serde(serialize_with = "serialize_i64_as_number", deserialize_with = "deserialize_integer")]
    pub max_target: i64,
    /// API 密钥（唯一）
    pub api_key: String,
    pub created_at: bson::DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl User {
    pub fn new(email: &str, referral_code: &str, position: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            email: email.to_string(),
            referral_code: referral_code.to_string(),
            referred_by: None,
            referral_count: 0,
            link_visits: 0,
            position,
            max_target: 0,
            api_key: format!("key_{}", referral_code),
            created_at: bson::DateTime::from_millis(created_at.timestamp_millis()),
            updated_at: None,
        }
    }

    pub fn with_counts(mut self, referral_count: u64, link_visits: u64) -> Self {
        self.referral_count = referral_count;
        self.link_visits = link_visits;
        self
    }

    /// 列表查询使用的字段投影
    pub fn to_record(&self) -> AppResult<UserRecord> {
        Ok(UserRecord {
            email: self.email.clone(),
            referral_code: self.referral_code.clone(),
            referral_count: self.referral_count,
            link_visits: self.link_visits,
            position: self.position,
            created_at: bson_to_chrono(self.created_at)?,
        })
    }
}

/// 排行榜记录：列表查询返回的只读投影
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub referral_code: String,
    pub referral_count: u64,
    pub link_visits: u64,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

/// 投影查询在 MongoDB 中的形状
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserListingDocument {
    pub email: String,
    pub referral_code: String,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub referral_count: u64,
    #[serde(default, deserialize_with = "deserialize_counter")]
    pub link_visits: u64,
    #[serde(deserialize_with = "deserialize_integer")]
    pub position: i64,
    pub created_at: bson::DateTime,
}

impl UserListingDocument {
    pub(crate) fn projection() -> Document {
        doc! {
            "_id": 0,
            "email": 1,
            "referralCode": 1,
            "referralCount": 1,
            "linkVisits": 1,
            "position": 1,
            "createdAt": 1,
        }
    }
}

impl TryFrom<UserListingDocument> for UserRecord {
    type Error = AppError;

    fn try_from(document: UserListingDocument) -> AppResult<Self> {
        Ok(UserRecord {
            email: document.email,
            referral_code: document.referral_code,
            referral_count: document.referral_count,
            link_visits: document.link_visits,
            position: document.position,
            created_at: bson_to_chrono(document.created_at)?,
        })
    }
}

fn bson_to_chrono(value: bson::DateTime) -> AppResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(value.timestamp_millis())
        .single()
        .ok_or_else(|| AppError::StoreUnavailable(format!("createdAt out of range: {}", value.timestamp_millis())))
}
