use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::AppState;

/// 所有页面请求的入口
///
/// 在请求开始时取得当前快照并放入扩展中，之后的处理都使用这一份快照。
/// `If-None-Match` 与快照的 etag 相同时直接返回 304，不再执行后续的处理。
pub async fn prepare(State(state): State<AppState>, mut request: Request<Body>, next: Next) -> Response {
    let snapshot = state.store.current();
    debug!("{} {}", request.method(), request.uri().path());

    let etag = HeaderValue::from_str(&snapshot.etag).ok();
    let matched = match (&etag, request.headers().get(header::IF_NONE_MATCH)) {
        (Some(etag), Some(value)) => etag_matches(value, etag),
        _ => false,
    };

    let mut response = if matched {
        debug!("Not modified: {}", request.uri().path());
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        let language = HeaderValue::from_str(&snapshot.config.language).ok();
        request.extensions_mut().insert(Arc::clone(&snapshot));

        let mut response = next.run(request).await;
        if let Some(language) = language {
            response.headers_mut().insert(header::CONTENT_LANGUAGE, language);
        }
        response
    };

    let headers = response.headers_mut();
    if let Some(etag) = etag {
        headers.insert(header::ETAG, etag);
    }
    for (name, value) in state.headers.iter() {
        headers.insert(name.clone(), value.clone());
    }
    response
}

/// 允许客户端带引号或弱校验前缀
fn etag_matches(value: &HeaderValue, etag: &HeaderValue) -> bool {
    let Ok(value) = value.to_str() else {
        return false;
    };
    let Ok(etag) = etag.to_str() else {
        return false;
    };

    value.split(',').any(|candidate| {
        let candidate = candidate.trim();
        let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
        candidate.trim_matches('"') == etag
    })
}
