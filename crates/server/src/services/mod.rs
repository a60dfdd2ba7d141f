////////////////////////////////////////////////////////////////////////
//
// Service 层只依赖 repository trait，不直接接触 MongoDB
//
//////////////////////////////////////////////////////////////////////

pub mod submission;

use database::{Database, DynUserRepository};
use std::sync::Arc;
use tracing::info;

use self::submission::{DynSubmissionService, SubmissionService};

#[derive(Clone)]
pub struct Services {
    pub submission: DynSubmissionService,
}

impl Services {
    pub fn new(db: Database) -> Self {
        Self::from_repository(Arc::new(db))
    }

    /// 用任意用户仓库实现构造（测试里使用内存仓库）
    pub fn from_repository(repository: DynUserRepository) -> Self {
        let submission = Arc::new(SubmissionService::new(repository)) as DynSubmissionService;

        info!("🧠 Services initialized");
        Self { submission }
    }
}
