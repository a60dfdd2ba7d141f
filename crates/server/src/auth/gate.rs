use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::warn;
use utils::{AppError, AppResult};

/// 口令错误时返回的文案
pub const ACCESS_DENIED: &str = "ACCESS DENIED";

/// 管理后台口令校验
///
/// 只保存口令摘要；比较的是等长摘要，耗时与输入无关
pub struct AdminGate {
    digest: Vec<u8>,
}

impl AdminGate {
    pub fn new(password: &str) -> Self {
        if password.is_empty() {
            warn!("⚠️ ADMIN_PASSWORD 为空，所有登录请求都会被拒绝");
        }

        Self {
            digest: Sha256::digest(password.as_bytes()).to_vec(),
        }
    }

    pub fn verify(&self, candidate: &str) -> AppResult<()> {
        let candidate_digest = Sha256::digest(candidate.as_bytes());
        let matches: bool = self.digest.as_slice().ct_eq(candidate_digest.as_slice()).into();

        if matches && !candidate.is_empty() {
            Ok(())
        } else {
            Err(AppError::AccessDenied(ACCESS_DENIED.to_string()))
        }
    }
}
