use axum::{
    body::Body,
    extract::{Path as UrlPath, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension,
};
use gitype_infra::paths::{is_ignored_asset, join_safe};
use gitype_service::Snapshot;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error};

use super::{content_type, render_error};
use crate::AppState;

/// 根据文件扩展名获取Content-Type
pub fn get_content_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "ico" => "image/x-icon",
        "html" | "htm" => "text/html",
        "xml" | "xsl" => "application/xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// 读取普通文件，文件不存在或是目录时返回 None
async fn read_file(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => tokio::fs::read(path).await.map(Some),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// 输出 base 目录下的文件，不存在时返回 None
async fn serve_file(snapshot: &Snapshot, base: &Path, request_path: &str) -> Option<Response> {
    let file = join_safe(base, request_path)?;

    match read_file(&file).await {
        Ok(Some(content)) => Some(
            (
                [(header::CONTENT_TYPE, get_content_type(request_path))],
                Body::from(content),
            )
                .into_response(),
        ),
        Ok(None) => None,
        Err(e) => {
            error!("Failed to read {}: {}", file.display(), e);
            Some(render_error(snapshot, StatusCode::INTERNAL_SERVER_ERROR).await)
        }
    }
}

/// 输出订阅内容或是 raws 目录下的文件，都不存在时返回 404
///
/// request_path 为请求中未解码的路径。
pub(crate) async fn raw(state: &AppState, snapshot: &Snapshot, request_path: &str) -> Response {
    let Ok(request_path) = urlencoding::decode(request_path) else {
        debug!("Invalid path encoding: {}", request_path);
        return render_error(snapshot, StatusCode::NOT_FOUND).await;
    };
    let request_path = request_path.as_ref();

    if let Some(feed) = snapshot.feeds.find(request_path) {
        return (
            [(header::CONTENT_TYPE, content_type(&feed.mime))],
            feed.content.clone(),
        )
            .into_response();
    }

    let raws = state.store.paths().raws_dir();
    if let Some(response) = serve_file(snapshot, &raws, request_path).await {
        return response;
    }

    debug!("Not found: {}", request_path);
    render_error(snapshot, StatusCode::NOT_FOUND).await
}

/// 输出 base 目录下的资源文件
///
/// 模板和配置文件不允许访问，与文件不存在时一样交由 [`raw`] 处理。
pub(crate) async fn asset(
    state: &AppState,
    snapshot: &Snapshot,
    base: &Path,
    path: &str,
    request_path: &str,
) -> Response {
    if !is_ignored_asset(path) {
        if let Some(response) = serve_file(snapshot, base, path).await {
            return response;
        }
    }
    raw(state, snapshot, request_path).await
}

/// 未匹配任何路由的请求
pub async fn serve_raw(
    State(state): State<AppState>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
    uri: Uri,
) -> Response {
    raw(&state, &snapshot, uri.path()).await
}

/// 主题目录下的静态资源，路径中包含主题 ID，例如 `/themes/default/style.css`
pub async fn serve_theme(
    State(state): State<AppState>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
    UrlPath(path): UrlPath<String>,
    uri: Uri,
) -> Response {
    let themes = state.store.paths().themes_dir();
    asset(&state, &snapshot, &themes, &path, uri.path()).await
}
