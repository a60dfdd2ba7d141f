use super::{
    export::{export_records, ExportFile},
    ordering::display_order,
    pagination::{Page, Paginator},
};
use chrono::NaiveDate;
use database::{UserRecord, UserRepositoryTrait};
use tracing::{info, warn};
use utils::{AppError, AppResult};

pub type ReportPage = Page<UserRecord>;

/// 报表视图所处的阶段
///
/// `Idle → Loading → {Ready, Failed}`，`Ready/Failed → Loading`（刷新），任意阶段 `→ Closed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Ready,
    Failed(String),
    Closed,
}

/// 一次进行中的刷新，完成时交回给视图
#[derive(Debug)]
#[must_use = "a refresh ticket must be completed"]
pub struct RefreshTicket {
    sequence: u64,
}

impl RefreshTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// 后台排行榜的视图状态：快照 + 当前页
///
/// 翻页只在已有快照上切片，不会重新查询
#[derive(Debug)]
pub struct ReportView {
    paginator: Paginator,
    current_page: usize,
    // None 表示还没有任何一次刷新完成
    snapshot: Option<Result<Vec<UserRecord>, String>>,
    issued: u64,
    in_flight: usize,
    closed: bool,
}

impl Default for ReportView {
    fn default() -> Self {
        Self::new(Paginator::default())
    }
}

impl ReportView {
    pub fn new(paginator: Paginator) -> Self {
        Self {
            paginator,
            current_page: 1,
            snapshot: None,
            issued: 0,
            in_flight: 0,
            closed: false,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        if self.closed {
            return ViewPhase::Closed;
        }
        if self.in_flight > 0 {
            return ViewPhase::Loading;
        }
        match &self.snapshot {
            None => ViewPhase::Idle,
            Some(Ok(_)) => ViewPhase::Ready,
            Some(Err(message)) => ViewPhase::Failed(message.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == ViewPhase::Ready
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// 展示顺序的完整快照，未就绪时为空
    pub fn rows(&self) -> &[UserRecord] {
        match (&self.snapshot, self.is_ready()) {
            (Some(Ok(rows)), true) => rows,
            _ => &[],
        }
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.rows().len())
    }

    /// 进入 Loading；视图已关闭时返回 None
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        if self.closed {
            return None;
        }

        self.issued += 1;
        self.in_flight += 1;
        Some(RefreshTicket { sequence: self.issued })
    }

    /// 按完成顺序生效，后完成的覆盖先完成的
    ///
    /// 返回 false 表示结果被丢弃（视图已关闭）
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, result: Result<Vec<UserRecord>, String>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.closed {
            warn!("🗑️ 报表视图已关闭，丢弃刷新结果 #{}", ticket.sequence);
            return false;
        }

        match result {
            Ok(records) => {
                let rows = display_order(records);
                self.current_page = self.paginator.clamp(self.current_page, rows.len());
                info!("🔄 刷新 #{} 完成，共 {} 条记录", ticket.sequence, rows.len());
                self.snapshot = Some(Ok(rows));
            }
            Err(message) => {
                warn!("❌ 刷新 #{} 失败: {}", ticket.sequence, message);
                self.snapshot = Some(Err(message));
            }
        }

        true
    }

    /// 重新执行列表查询并替换快照
    pub async fn refresh(&mut self, repository: &(dyn UserRepositoryTrait + Send + Sync)) -> AppResult<()> {
        let ticket = self
            .begin_refresh()
            .ok_or_else(|| AppError::BadRequest("Report view has been closed".to_string()))?;

        match repository.list_users_by_position().await {
            Ok(records) => {
                self.complete_refresh(ticket, Ok(records));
                Ok(())
            }
            Err(err) => {
                self.complete_refresh(ticket, Err(err.public_message()));
                Err(err)
            }
        }
    }

    /// 视图销毁，之后完成的刷新都会被丢弃
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        if self.is_ready() {
            self.current_page = self.paginator.clamp(page, self.rows().len());
        }
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        let next = self.paginator.next(self.current_page, self.rows().len());
        self.go_to_page(next)
    }

    pub fn previous_page(&mut self) -> usize {
        let previous = self.paginator.previous(self.current_page, self.rows().len());
        self.go_to_page(previous)
    }

    /// 当前页，只有 Ready 时才有
    pub fn page(&self) -> Option<ReportPage> {
        if !self.is_ready() {
            return None;
        }
        Some(self.paginator.paginate(self.rows(), self.current_page))
    }

    /// 导出整份快照，与当前页无关
    pub fn export(&self, today: NaiveDate) -> AppResult<ExportFile> {
        match self.phase() {
            ViewPhase::Ready => export_records(self.rows(), today),
            ViewPhase::Failed(message) => Err(AppError::StoreUnavailable(message)),
            other => Err(AppError::BadRequest(format!("Report is not ready to export ({:?})", other))),
        }
    }
}
