mod config;
mod error;
mod server;

use anyhow::{bail, Context};
use config::{Config, LogConfig};
use gitype_infra::init::init_data_dir;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// 初始化日志，RUST_LOG 优先于配置文件中的 log.level
fn init_tracing(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = FmtSubscriber::builder().with_env_filter(filter);

    if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
    .context("Failed to set tracing subscriber")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    init_tracing(&config.log)?;

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        // gitype init [dir]
        Some("init") => {
            let dir = args.next().map(PathBuf::from).unwrap_or_else(|| config.data_dir.clone());
            init_data_dir(&dir).with_context(|| format!("Failed to initialize {}", dir.display()))?;
            info!("Initialized data directory {}", dir.display());
            return Ok(());
        }
        Some(command) => bail!("Unknown command: {}", command),
        None => {}
    }

    config.validate()?;
    info!("Starting gitype {}...", gitype_domain::APP_VERSION);
    server::run(config).await?;

    Ok(())
}
