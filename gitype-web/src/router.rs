use axum::{
    routing::{get, on, MethodFilter},
    Router,
};
use gitype_service::Webhook;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;

use crate::{handlers, middleware, AppState};

/// 创建页面路由
///
/// 未匹配的路径由 [`handlers::serve_raw`] 处理，依次查找订阅内容和 raws 目录。
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_posts))
        .route("/index.html", get(handlers::get_posts))
        .route("/posts/*path", get(handlers::get_post))
        .route("/tags.html", get(handlers::get_tags))
        .route("/tags/*path", get(handlers::get_tag))
        .route("/archives.html", get(handlers::get_archives))
        .route("/links.html", get(handlers::get_links))
        .route("/search.html", get(handlers::get_search))
        .route("/themes/*path", get(handlers::serve_theme))
        .fallback(handlers::serve_raw)
        .layer(
            // 先添加的层在外层，304 的响应不经过压缩
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    middleware::prepare,
                ))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

/// webhook 路由，不经过页面的中间件
pub fn webhook_router(url: &str, method: MethodFilter, webhook: Arc<Webhook>) -> Router {
    Router::new()
        .route(url, on(method, handlers::trigger_webhook))
        .with_state(webhook)
}
