//! 快照的发布与重新加载
//!
//! 请求处理在开始时取得当前快照的 `Arc`，之后的所有读取都基于这一份数据；
//! 重新加载时先在后台构建完整的新快照，成功之后才整体替换。

pub mod watcher;
pub mod webhook;

pub use watcher::{Watcher, WatcherConfig};
pub use webhook::{GitUpdater, SourceUpdater, Webhook};

use chrono::Utc;
use gitype_domain::LoadError;
use gitype_infra::DataPaths;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::content;
use crate::error::ReloadError;
use crate::snapshot::Snapshot;

/// 保存当前发布的快照
pub struct SnapshotStore {
    paths: DataPaths,
    current: RwLock<Arc<Snapshot>>,
    reloading: AtomicBool,
}

/// 离开作用域时清除加载中的标记
struct ReloadGuard<'a>(&'a AtomicBool);

impl Drop for ReloadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SnapshotStore {
    pub fn new(paths: DataPaths, snapshot: Snapshot) -> Self {
        Self {
            paths,
            current: RwLock::new(Arc::new(snapshot)),
            reloading: AtomicBool::new(false),
        }
    }

    /// 加载数据目录并以此创建
    pub fn open(paths: DataPaths) -> Result<Self, LoadError> {
        let snapshot = content::load(&paths)?;
        Ok(Self::new(paths, snapshot))
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// 当前发布的快照
    pub fn current(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
        snapshot
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading.load(Ordering::Acquire)
    }

    /// 距离当前快照的生成时间不足 min_interval 时返回 [`ReloadError::TooFrequent`]
    pub fn check_interval(&self, min_interval: Duration) -> Result<(), ReloadError> {
        let elapsed = Utc::now().signed_duration_since(self.current().created);
        match elapsed.to_std() {
            Ok(elapsed) if elapsed >= min_interval => Ok(()),
            _ => Err(ReloadError::TooFrequent),
        }
    }

    /// 重新加载数据目录
    ///
    /// 加载在阻塞线程中进行，失败时保留原有的快照。同一时间只允许一个加载任务。
    pub async fn reload(&self) -> Result<Arc<Snapshot>, ReloadError> {
        if self
            .reloading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ReloadError::InProgress);
        }
        let _guard = ReloadGuard(&self.reloading);

        let start = Instant::now();
        let paths = self.paths.clone();
        let result = tokio::task::spawn_blocking(move || content::load(&paths)).await?;

        match result {
            Ok(snapshot) => {
                let snapshot = self.publish(snapshot);
                info!(
                    "Reloaded {} posts and {} tags in {}ms",
                    snapshot.posts.len(),
                    snapshot.tags.len(),
                    start.elapsed().as_millis()
                );
                Ok(snapshot)
            }
            Err(e) => {
                error!("Failed to reload data from {}: {}", self.paths.root().display(), e);
                Err(e.into())
            }
        }
    }

    /// 在后台重新加载，不等待结果
    pub fn spawn_reload(self: &Arc<Self>) {
        let store = self.clone();
        tokio::spawn(async move {
            // 错误已经在 reload 中记录
            let _ = store.reload().await;
        });
    }
}
