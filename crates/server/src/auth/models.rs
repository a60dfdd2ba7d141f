use serde::{Deserialize, Serialize};
use utils::AppConfig;
use utoipa::ToSchema;
use validator::Validate;

/// 登录成功后前端跳转的页面
pub const SUBMISSIONS_PAGE: &str = "/submissions";

/// JWT Claims 结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户ID
    pub sub: String,
    /// 过期时间
    pub exp: u64,
    /// 签发时间
    pub iat: u64,
    /// 签发者
    pub iss: String,
}

/// 认证用户信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// 管理后台登录请求
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// 管理口令，空串同样交给口令校验处理
    pub password: String,
}

/// 认证响应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// JWT访问令牌
    pub access_token: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间(秒)
    pub expires_in: u64,
    /// 登录后跳转地址
    pub redirect_to: String,
}

/// 认证配置
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expires_in_hours: u64,
    pub admin_password: String,
}

impl From<&AppConfig> for AuthConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            jwt_expires_in_hours: config.jwt_expires_in_hours,
            admin_password: config.admin_password.clone(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("jwt_expires_in_hours", &self.jwt_expires_in_hours)
            .field("admin_password", &"***")
            .finish()
    }
}
