use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Referral Leaderboard API",
        description = "推荐排行榜管理后台 API 文档",
        version = "1.0.0"
    ),
    paths(
        crate::api::health,
        crate::api::auth_controller::login,
        crate::api::user_controller::users,
        crate::api::submission_controller::report,
        crate::api::submission_controller::export,
    ),
    components(
        schemas(
            crate::auth::LoginRequest,
            crate::auth::AuthResponse,
            crate::dtos::user_dto::UsersResponse,
            crate::dtos::submission_dto::ReportQuery,
            crate::dtos::submission_dto::SubmissionRow,
            crate::dtos::submission_dto::SubmissionPageResponse,
            database::UserRecord,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "系统状态", description = "健康检查"),
        (name = "authentication", description = "管理后台登录"),
        (name = "users", description = "用户列表"),
        (name = "submissions", description = "推荐报表与导出")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme("bearer_auth", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
        }
    }
}
