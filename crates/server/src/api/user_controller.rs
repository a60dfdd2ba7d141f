use crate::{auth::AuthUser, dtos::user_dto::UsersResponse, services::Services};
use axum::{routing::get, Extension, Json, Router};
use tracing::info;
use utils::AppResult;

pub struct UserController;
impl UserController {
    pub fn app() -> Router {
        Router::new().route("/users", get(users))
    }
}

/// 按 position 升序列出全部用户
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "用户列表", body = UsersResponse),
        (status = 401, description = "未登录"),
        (status = 500, description = "Failed to fetch users")
    )
)]
pub async fn users(
    Extension(services): Extension<Services>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UsersResponse>> {
    let users = services.submission.list_users().await?;
    info!("👤 {} 查询用户列表，共 {} 条", auth_user.user_id, users.len());

    Ok(Json(UsersResponse { users }))
}
