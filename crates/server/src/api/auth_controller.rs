use crate::{
    auth::{AdminGate, AuthResponse, JwtManager, LoginRequest, SUBMISSIONS_PAGE},
    extractors::validation_extractor::ValidationExtractor,
};
use axum::{extract::Extension, routing::post, Json, Router};
use std::sync::Arc;
use tracing::{info, warn};
use utils::AppResult;

/// 管理后台会话主体
pub const ADMIN_SUBJECT: &str = "admin";

/// 认证控制器
pub struct AuthController;

impl AuthController {
    pub fn app() -> Router {
        Router::new().route("/auth/login", post(login))
    }
}

/// 管理口令登录
///
/// 口令正确时签发会话令牌，并告知前端跳转到报表页
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = AuthResponse),
        (status = 400, description = "请求参数错误"),
        (status = 401, description = "ACCESS DENIED")
    )
)]
pub async fn login(
    Extension(gate): Extension<Arc<AdminGate>>,
    Extension(jwt_manager): Extension<Arc<JwtManager>>,
    ValidationExtractor(request): ValidationExtractor<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if let Err(e) = gate.verify(&request.password) {
        warn!("🔒 管理后台登录失败");
        return Err(e);
    }

    let access_token = jwt_manager.generate_token(ADMIN_SUBJECT)?;
    info!("🔓 管理后台登录成功");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: jwt_manager.expires_in_seconds(),
        redirect_to: SUBMISSIONS_PAGE.to_string(),
    }))
}
