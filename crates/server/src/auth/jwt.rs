use crate::auth::models::{AuthConfig, Claims};
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// 签发者
pub const TOKEN_ISSUER: &str = "referral-admin";

/// JWT令牌管理器
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: AuthConfig,
}

impl JwtManager {
    /// 创建新的JWT管理器
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn expires_in_seconds(&self) -> u64 {
        self.config.jwt_expires_in_hours * 3600
    }

    /// 生成JWT令牌
    pub fn generate_token(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expires_in_hours as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as u64,
            iat: now.timestamp() as u64,
            iss: TOKEN_ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow!("Failed to generate JWT token: {}", e))
    }

    /// 验证JWT令牌（签名、过期时间、签发者）
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[TOKEN_ISSUER]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow!("Invalid JWT token: {}", e))?;

        Ok(token_data.claims)
    }
}

/// JWT令牌提取器
pub struct TokenExtractor;

impl TokenExtractor {
    /// 从Authorization头部提取Bearer令牌
    pub fn extract_bearer_token(auth_header: Option<&str>) -> Option<String> {
        auth_header
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test_secret_key_for_jwt_testing_only".to_string(),
            jwt_expires_in_hours: 24,
            admin_password: "admin123".to_string(),
        }
    }

    #[test]
    fn test_jwt_generation_and_verification() {
        let jwt_manager = JwtManager::new(create_test_config());

        let token = jwt_manager.generate_token("admin").unwrap();
        let claims = jwt_manager.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.iss, TOKEN_ISSUER);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(jwt_manager.expires_in_seconds(), 24 * 3600);
    }

    #[test]
    fn test_jwt_invalid_token() {
        let jwt_manager = JwtManager::new(create_test_config());

        assert!(jwt_manager.verify_token("invalid_token").is_err());
        assert!(jwt_manager.verify_token("").is_err());
    }

    #[test]
    fn test_jwt_rejects_foreign_secret() {
        let jwt_manager = JwtManager::new(create_test_config());
        let mut other_config = create_test_config();
        other_config.jwt_secret = "another_secret".to_string();
        let other = JwtManager::new(other_config);

        let token = other.generate_token("admin").unwrap();
        assert!(jwt_manager.verify_token(&token).is_err());
    }

    #[test]
    fn test_jwt_rejects_expired_token() {
        let jwt_manager = JwtManager::new(create_test_config());
        let now = Utc::now().timestamp() as u64;

        // 超出默认 60 秒 leeway
        let claims = Claims {
            sub: "admin".to_string(),
            exp: now - 3600,
            iat: now - 7200,
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_jwt_testing_only".as_ref()),
        )
        .unwrap();

        assert!(jwt_manager.verify_token(&token).is_err());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let token = TokenExtractor::extract_bearer_token(Some("Bearer abc.def.ghi"));
        assert_eq!(token, Some("abc.def.ghi".to_string()));

        assert_eq!(TokenExtractor::extract_bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(TokenExtractor::extract_bearer_token(Some("Bearer   ")), None);
        assert_eq!(TokenExtractor::extract_bearer_token(None), None);
    }
}
