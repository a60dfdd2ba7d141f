use crate::services::submission::{export::format_joined, ReportPage};
use database::UserRecord;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn default_page() -> i64 {
    1
}

/// 报表分页查询参数，越界页码会被夹到有效范围内
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// 页码（从1开始，小于1按1处理）
    #[serde(default = "default_page")]
    pub page: i64,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self { page: default_page() }
    }
}

/// 报表中的一行，字段均为展示用的格式化文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionRow {
    /// 例如 `#007`
    pub position: String,
    pub email: String,
    pub referral_code: String,
    /// 两位补零
    pub referrals: String,
    /// 三位补零
    pub link_visits: String,
    /// MM/DD/YYYY
    pub joined: String,
}

impl From<&UserRecord> for SubmissionRow {
    fn from(record: &UserRecord) -> Self {
        Self {
            position: format!("#{:03}", record.position),
            email: record.email.clone(),
            referral_code: record.referral_code.clone(),
            referrals: format!("{:02}", record.referral_count),
            link_visits: format!("{:03}", record.link_visits),
            joined: format_joined(&record.created_at),
        }
    }
}

/// 报表分页响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionPageResponse {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    /// 例如 `01 / 03`
    pub page_label: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub rows: Vec<SubmissionRow>,
}

impl From<ReportPage> for SubmissionPageResponse {
    fn from(page: ReportPage) -> Self {
        Self {
            page_label: format!("{:02} / {:02}", page.page, page.total_pages),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            rows: page.items.iter().map(SubmissionRow::from).collect(),
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}
