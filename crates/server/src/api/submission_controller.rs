use crate::{
    auth::AuthUser,
    dtos::submission_dto::{ReportQuery, SubmissionPageResponse},
    services::Services,
};
use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue,
    },
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::Utc;
use tracing::info;
use utils::{AppError, AppResult};

pub struct SubmissionController;
impl SubmissionController {
    pub fn app() -> Router {
        Router::new()
            .route("/submissions", get(report))
            .route("/submissions/export", get(export))
    }
}

/// 最新加入优先的分页报表
#[utoipa::path(
    get,
    path = "/api/v1/submissions",
    tag = "submissions",
    params(ReportQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "报表分页", body = SubmissionPageResponse),
        (status = 400, description = "页码不是整数"),
        (status = 401, description = "未登录"),
        (status = 500, description = "Failed to fetch users")
    )
)]
pub async fn report(
    Extension(services): Extension<Services>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> AppResult<Json<SubmissionPageResponse>> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    // 小于 1 的页码按第 1 页处理
    let page = usize::try_from(query.page.max(1)).unwrap_or(usize::MAX);
    let report = services.submission.report(page).await?;

    Ok(Json(SubmissionPageResponse::from(report)))
}

/// 导出完整报表为 CSV 附件
#[utoipa::path(
    get,
    path = "/api/v1/submissions/export",
    tag = "submissions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV 文件", content_type = "text/csv", body = String),
        (status = 401, description = "未登录"),
        (status = 500, description = "Failed to fetch users")
    )
)]
pub async fn export(
    Extension(services): Extension<Services>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Response> {
    let file = services.submission.export(Utc::now().date_naive()).await?;
    info!("📥 {} 下载了 {}", auth_user.user_id, file.filename);

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
        .map_err(|e| AppError::InternalServerError(format!("Invalid export filename: {}", e)))?;

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
