use axum::http::HeaderMap;
use gitype_service::SnapshotStore;
use std::sync::Arc;

/// 应用状态
///
/// 快照本身不放在状态中，每个请求在进入时从 store 取得一份。
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    /// 附加到所有响应中的报头
    pub headers: Arc<HeaderMap>,
}

impl AppState {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self {
            store,
            headers: Arc::new(HeaderMap::new()),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Arc::new(headers);
        self
    }
}
