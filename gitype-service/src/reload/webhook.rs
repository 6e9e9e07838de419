//! 由 webhook 触发的数据更新

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::{error, info};

use super::SnapshotStore;
use crate::error::ReloadError;

/// 更新数据目录的来源，例如从 git 仓库拉取
#[async_trait]
pub trait SourceUpdater: Send + Sync {
    async fn update(&self, data_dir: &Path) -> Result<(), ReloadError>;
}

/// 通过 git 命令更新数据目录
///
/// 目录存在时执行 `git pull`，否则从 repo_url 克隆。
#[derive(Debug, Clone, Default)]
pub struct GitUpdater {
    pub repo_url: Option<String>,
}

impl GitUpdater {
    pub fn new(repo_url: Option<String>) -> Self {
        Self { repo_url }
    }
}

#[async_trait]
impl SourceUpdater for GitUpdater {
    async fn update(&self, data_dir: &Path) -> Result<(), ReloadError> {
        let mut command = Command::new("git");
        if data_dir.exists() {
            command.arg("pull").current_dir(data_dir);
        } else {
            let repo = self.repo_url.as_deref().ok_or_else(|| {
                ReloadError::Update(format!(
                    "data directory {} does not exist and no repository is configured",
                    data_dir.display()
                ))
            })?;
            command.arg("clone").arg(repo).arg(data_dir);
        }

        let output = command
            .output()
            .await
            .map_err(|e| ReloadError::Update(format!("failed to run git: {}", e)))?;
        if !output.status.success() {
            return Err(ReloadError::Update(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        info!("Updated data directory {}", data_dir.display());
        Ok(())
    }
}

/// webhook 的处理逻辑：限制频率，然后在后台更新数据并重新加载
pub struct Webhook {
    store: Arc<SnapshotStore>,
    updater: Arc<dyn SourceUpdater>,
    frequency: Duration,
}

impl Webhook {
    pub fn new(store: Arc<SnapshotStore>, updater: Arc<dyn SourceUpdater>, frequency: Duration) -> Self {
        Self {
            store,
            updater,
            frequency,
        }
    }

    /// 检查频率并启动后台更新，不等待更新完成
    pub fn trigger(&self) -> Result<(), ReloadError> {
        if self.store.is_reloading() {
            return Err(ReloadError::InProgress);
        }
        self.store.check_interval(self.frequency)?;

        let store = self.store.clone();
        let updater = self.updater.clone();
        tokio::spawn(async move {
            let root = store.paths().root().to_path_buf();
            if let Err(e) = updater.update(&root).await {
                error!("Failed to update data directory {}: {}", root.display(), e);
                return;
            }
            // 错误已经在 reload 中记录
            let _ = store.reload().await;
        });

        Ok(())
    }
}
