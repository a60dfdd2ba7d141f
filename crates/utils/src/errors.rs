use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

/// 所有接口统一的错误类型，响应体固定为 `{ "error": "..." }`
#[derive(Error, Debug)]
pub enum AppError {
    /// 用户数据存储不可达或查询失败
    #[error("{0}")]
    StoreUnavailable(String),

    /// 管理口令不匹配
    #[error("{0}")]
    AccessDenied(String),

    /// 缺少或无效的会话令牌
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    MongoError(#[from] mongodb::error::Error),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),

    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AccessDenied(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::MongoError(_) | AppError::AnyhowError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回给调用方的文本，内部错误不透出细节
    pub fn public_message(&self) -> String {
        match self {
            AppError::MongoError(_) | AppError::AnyhowError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("❌ {}: {}", status, self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::StoreUnavailable("Failed to fetch users".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::AccessDenied("ACCESS DENIED".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::BadRequest("bad".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("missing".to_string()).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_messages_are_verbatim() {
        let err = AppError::StoreUnavailable("Failed to fetch users".to_string());
        assert_eq!(err.public_message(), "Failed to fetch users");

        let err = AppError::AnyhowError(anyhow::anyhow!("connection string leaked"));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::AccessDenied("ACCESS DENIED".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "ACCESS DENIED" }));
    }
}
