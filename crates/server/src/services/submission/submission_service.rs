use super::{
    export::ExportFile,
    view::{ReportPage, ReportView},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use database::{DynUserRepository, UserRecord};
use std::sync::Arc;
use tracing::info;
use utils::{AppError, AppResult};

pub type DynSubmissionService = Arc<dyn SubmissionServiceTrait + Send + Sync>;

#[async_trait]
pub trait SubmissionServiceTrait {
    /// 原始列表（position 升序）
    async fn list_users(&self) -> AppResult<Vec<UserRecord>>;

    /// 展示顺序的某一页，页码越界时自动修正
    async fn report(&self, page: usize) -> AppResult<ReportPage>;

    /// 完整导出
    async fn export(&self, today: NaiveDate) -> AppResult<ExportFile>;
}

#[derive(Clone)]
pub struct SubmissionService {
    repository: DynUserRepository,
}

impl SubmissionService {
    pub fn new(repository: DynUserRepository) -> Self {
        Self { repository }
    }

    // 每个请求独占一份快照
    async fn load_view(&self) -> AppResult<ReportView> {
        let mut view = ReportView::default();
        view.refresh(self.repository.as_ref()).await?;
        Ok(view)
    }
}

#[async_trait]
impl SubmissionServiceTrait for SubmissionService {
    async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        self.repository.list_users_by_position().await
    }

    async fn report(&self, page: usize) -> AppResult<ReportPage> {
        let mut view = self.load_view().await?;
        view.go_to_page(page);

        let report = view
            .page()
            .ok_or_else(|| AppError::InternalServerError("Report view is not ready".to_string()))?;
        view.close();

        info!("📄 报表第 {}/{} 页，共 {} 条", report.page, report.total_pages, report.total);
        Ok(report)
    }

    async fn export(&self, today: NaiveDate) -> AppResult<ExportFile> {
        let mut view = self.load_view().await?;
        let file = view.export(today)?;
        view.close();

        info!("📤 导出 {} ({} bytes)", file.filename, file.bytes.len());
        Ok(file)
    }
}
