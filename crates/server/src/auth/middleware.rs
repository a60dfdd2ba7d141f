use crate::auth::{AuthUser, JwtManager, TokenExtractor};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;
use utils::AppError;

/// 认证中间件状态
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: Arc<JwtManager>,
}

impl AuthState {
    pub fn new(jwt_manager: Arc<JwtManager>) -> Self {
        Self { jwt_manager }
    }
}

/// JWT认证中间件
pub async fn jwt_auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = TokenExtractor::extract_bearer_token(
        request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
    );

    match token {
        Some(token_str) => match auth_state.jwt_manager.verify_token(&token_str) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthUser { user_id: claims.sub });
                Ok(next.run(request).await)
            }
            Err(e) => {
                warn!("Token verification failed: {}", e);
                Err(AppError::Unauthorized("Invalid or expired session".to_string()))
            }
        },
        None => {
            warn!("No authentication token provided");
            Err(AppError::Unauthorized("Authentication required".to_string()))
        }
    }
}
