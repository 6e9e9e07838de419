pub mod files;
pub mod pages;
pub mod webhook;

pub use files::{get_content_type, serve_raw, serve_theme};
pub use pages::{get_archives, get_links, get_post, get_posts, get_search, get_tag, get_tags};
pub use webhook::trigger_webhook;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use gitype_domain::urls::QUERY_PAGE;
use gitype_infra::TemplateContext;
use gitype_service::Snapshot;
use std::collections::HashMap;
use tracing::error;

use crate::view::Page;

/// 计算第 page 页在 total 个元素中的范围 `[start, end)`
///
/// 页码从 1 开始，页码小于 1 或超出范围时返回 None。
pub fn get_posts_range(total: usize, page: i64, size: usize) -> Option<(usize, usize)> {
    if page < 1 || size == 0 {
        return None;
    }
    let start = size.checked_mul(usize::try_from(page - 1).ok()?)?;
    if start > total {
        return None;
    }
    Some((start, (start + size).min(total)))
}

/// 从查询参数中获取页码，不存在时为 1，格式错误时返回 400
pub(crate) fn parse_page(query: &HashMap<String, String>) -> Result<i64, StatusCode> {
    match query.get(QUERY_PAGE) {
        None => Ok(1),
        Some(value) if value.is_empty() => Ok(1),
        Some(value) => value.trim().parse().map_err(|_| StatusCode::BAD_REQUEST),
    }
}

/// 带 charset 的 Content-Type
pub(crate) fn content_type(mime: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{};charset=utf-8", mime))
        .unwrap_or_else(|_| HeaderValue::from_static("text/html;charset=utf-8"))
}

/// 渲染页面，模板执行出错时返回 500
pub(crate) async fn render(snapshot: &Snapshot, template: &str, page: &Page<'_>) -> Response {
    let rendered = TemplateContext::from_serialize(page)
        .map_err(|e| format!("Failed to build context for template {}: {}", template, e))
        .and_then(|context| snapshot.render(template, &context).map_err(|e| e.to_string()));

    match rendered {
        Ok(html) => (
            [(header::CONTENT_TYPE, content_type(&snapshot.config.mime))],
            html,
        )
            .into_response(),
        Err(e) => {
            error!("{}", e);
            render_error(snapshot, StatusCode::INTERNAL_SERVER_ERROR).await
        }
    }
}

/// 输出错误页面
///
/// 主题目录下存在 `{code}.html` 时原样输出该文件，否则输出状态码对应的文本。
pub(crate) async fn render_error(snapshot: &Snapshot, status: StatusCode) -> Response {
    let file = snapshot.theme.path.join(format!("{}.html", status.as_u16()));
    if let Ok(content) = tokio::fs::read(&file).await {
        return (
            status,
            [(header::CONTENT_TYPE, content_type("text/html"))],
            Body::from(content),
        )
            .into_response();
    }

    (status, status.canonical_reason().unwrap_or_default()).into_response()
}
