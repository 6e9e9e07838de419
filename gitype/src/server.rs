use axum::Router;
use gitype_infra::DataPaths;
use gitype_service::{GitUpdater, SnapshotStore, SourceUpdater, Watcher, WatcherConfig, Webhook};
use gitype_web::{webhook_router, AppState};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::{GitypeError, Result};

/// 创建应用路由
pub fn create_router(config: &Config, store: Arc<SnapshotStore>) -> Result<Router> {
    let state = AppState::new(store.clone()).with_headers(config.header_map()?);
    let mut app = gitype_web::create_router(state);

    if config.webhook.enabled {
        let updater = Arc::new(GitUpdater::new(config.webhook.repo_url.clone()));
        let webhook = Arc::new(Webhook::new(store, updater, config.webhook.frequency()));
        app = app.merge(webhook_router(
            &config.webhook.url,
            config.webhook.method_filter()?,
            webhook,
        ));
        info!("Webhook enabled at {} {}", config.webhook.method, config.webhook.url);
    }

    Ok(app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}

/// 加载数据目录，启用 webhook 且目录不存在时先从仓库克隆
pub async fn open_store(config: &Config) -> Result<Arc<SnapshotStore>> {
    let paths = DataPaths::new(&config.data_dir);

    if config.webhook.enabled && config.webhook.repo_url.is_some() && !paths.root().exists() {
        GitUpdater::new(config.webhook.repo_url.clone())
            .update(paths.root())
            .await?;
    }

    let store = tokio::task::spawn_blocking(move || SnapshotStore::open(paths))
        .await
        .map_err(|e| GitypeError::Internal(format!("Failed to load data: {}", e)))??;

    let snapshot = store.current();
    info!(
        "Loaded {} posts and {} tags from {}",
        snapshot.posts.len(),
        snapshot.tags.len(),
        config.data_dir.display()
    );

    Ok(Arc::new(store))
}

/// 启动 HTTP 服务，直到收到退出信号
pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config).await?;

    if config.watcher.enabled {
        Watcher::new(
            store.clone(),
            WatcherConfig {
                interval: Duration::from_millis(config.watcher.interval_ms),
                debounce: Duration::from_millis(config.watcher.debounce_ms),
            },
        )
        .spawn();
    }

    let app = create_router(&config, store)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
