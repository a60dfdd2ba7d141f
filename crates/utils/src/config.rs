use clap::Parser;
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
#[clap(rename_all = "lowercase")]
pub enum CargoEnv {
    Development,
    Production,
}

/// 环境配置加载器
pub struct EnvLoader;

impl EnvLoader {
    /// 根据 CARGO_ENV 选择要加载的配置文件名
    pub fn env_file_for(cargo_env: &str) -> &'static str {
        match cargo_env {
            "production" | "Production" | "prod" => ".env.production",
            "development" | "Development" | "dev" => ".env.development",
            "test" | "Test" => ".env.test",
            _ => ".env.development",
        }
    }

    /// 根据 CARGO_ENV 加载对应的环境配置文件
    ///
    /// 日志系统此时还没有初始化，所以这里只能直接写 stderr
    pub fn load_env_file() -> Result<(), dotenvy::Error> {
        let cargo_env = std::env::var("CARGO_ENV").unwrap_or_else(|_| "development".to_string());
        let env_file = Self::env_file_for(&cargo_env);

        if !std::path::Path::new(env_file).exists() {
            // 回退到默认的 .env 文件
            if std::path::Path::new(".env").exists() {
                dotenvy::from_filename(".env")?;
            } else {
                eprintln!("⚠️  未找到 {} 或 .env，只使用进程环境变量", env_file);
            }
            return Ok(());
        }

        dotenvy::from_filename(env_file)?;
        eprintln!("✅ 已加载环境配置文件: {} (CARGO_ENV={})", env_file, cargo_env);

        Ok(())
    }
}

#[derive(clap::Parser, Clone, Debug)]
#[command(name = "referral", about = "Referral leaderboard backend")]
pub struct AppConfig {
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    #[clap(long, env, default_value = "0.0.0.0")]
    pub app_host: String,

    #[clap(long, env, default_value = "8000")]
    pub app_port: u16,

    #[clap(long, env, default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    #[clap(long, env)]
    pub mongo_db: String,

    /// 管理后台口令，只在服务端比较
    #[clap(long, env, hide_env_values = true)]
    pub admin_password: String,

    /// 会话令牌签名密钥
    #[clap(long, env, hide_env_values = true)]
    pub jwt_secret: String,

    #[clap(long, env, default_value = "24")]
    pub jwt_expires_in_hours: u64,

    /// 生产环境日志目录，未设置时使用可执行文件旁的 logs/
    #[clap(long, env)]
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// 手动创建配置实例（用于测试）
    pub fn new_for_test() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            app_host: "127.0.0.1".to_string(),
            app_port: 8765,
            mongo_uri: std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db: std::env::var("MONGO_DB").unwrap_or_else(|_| "referral_test".to_string()),
            admin_password: "admin123".to_string(),
            jwt_secret: "test_secret_key_for_jwt_testing_only".to_string(),
            jwt_expires_in_hours: 24,
            log_dir: None,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}
