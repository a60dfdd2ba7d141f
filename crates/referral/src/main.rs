use anyhow::{Context, Result};
use clap::Parser;
use server::app::ApplicationServer;
use std::sync::Arc;
use tracing::info;
use utils::{AppConfig, Logger};

#[tokio::main]
async fn main() -> Result<()> {
    // 根据 CARGO_ENV 加载对应的环境配置文件
    if let Err(e) = utils::EnvLoader::load_env_file() {
        eprintln!("⚠️  环境配置文件加载失败: {}", e);
    }

    let config = Arc::new(AppConfig::parse());

    // guard 需要活到进程结束
    let _guard = Logger::new_with_log_dir(config.cargo_env, config.log_dir.clone());
    info!("🔧 配置加载完成，运行环境: {:?}", config.cargo_env);

    ApplicationServer::serve(config).await.context("🔴 Failed to start server")?;

    Ok(())
}
