//! 以轮询的方式监视数据目录的变化

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::SnapshotStore;

#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// 两次扫描之间的间隔
    pub interval: Duration,
    /// 距离上次加载不足该时间的变化暂不处理，留到下一次扫描
    pub debounce: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            debounce: Duration::from_secs(1),
        }
    }
}

/// 数据目录的状态摘要，文件数量或最新修改时间变化即认为内容有变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fingerprint {
    pub files: usize,
    pub latest: Option<SystemTime>,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// 扫描目录下的文件，忽略以 `.` 开头的文件和目录，例如 `.git`
pub fn fingerprint(root: &Path) -> Fingerprint {
    let mut result = Fingerprint::default();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        result.files += 1;
        if let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) {
            if result.latest.map_or(true, |latest| modified > latest) {
                result.latest = Some(modified);
            }
        }
    }

    result
}

pub struct Watcher {
    store: Arc<SnapshotStore>,
    config: WatcherConfig,
}

impl Watcher {
    pub fn new(store: Arc<SnapshotStore>, config: WatcherConfig) -> Self {
        Self { store, config }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let root = self.store.paths().root().to_path_buf();
        info!(
            "Watching {} for changes every {}ms",
            root.display(),
            self.config.interval.as_millis()
        );

        let mut last = scan(root.clone()).await;
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let current = scan(root.clone()).await;
            if current == last {
                continue;
            }

            if self.store.check_interval(self.config.debounce).is_err() || self.store.is_reloading() {
                debug!("Changes in {} deferred, last reload is too recent", root.display());
                continue;
            }

            debug!("Changes detected in {}, reloading", root.display());
            last = current;
            self.store.spawn_reload();
        }
    }
}

async fn scan(root: PathBuf) -> Fingerprint {
    match tokio::task::spawn_blocking(move || fingerprint(&root)).await {
        Ok(fingerprint) => fingerprint,
        Err(e) => {
            warn!("Failed to scan data directory: {}", e);
            Fingerprint::default()
        }
    }
}
