pub mod auth_controller;
pub mod submission_controller;
pub mod user_controller;

use crate::auth::{jwt_auth_middleware, AuthState};
use axum::{
    middleware,
    routing::{get, Router},
};

/// 系统健康检查
///
/// 返回服务器运行状态
#[utoipa::path(
    get,
    path = "/api/v1/",
    responses(
        (status = 200, description = "服务器运行正常", body = String)
    ),
    tag = "系统状态"
)]
pub async fn health() -> &'static str {
    "Server is running! 🚀"
}

pub fn app(auth_state: AuthState) -> Router {
    // 需要会话令牌的路由
    let protected = Router::new()
        .merge(user_controller::UserController::app())
        .merge(submission_controller::SubmissionController::app())
        .route_layer(middleware::from_fn_with_state(auth_state, jwt_auth_middleware));

    Router::new()
        .route("/", get(health))
        .merge(auth_controller::AuthController::app())
        .merge(protected)
}
