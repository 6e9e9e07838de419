use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gitype_service::{ReloadError, Webhook};
use std::sync::Arc;
use tracing::{debug, error};

/// 触发数据更新，更新在后台进行
pub async fn trigger_webhook(State(webhook): State<Arc<Webhook>>) -> Response {
    match webhook.trigger() {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e @ (ReloadError::TooFrequent | ReloadError::InProgress)) => {
            debug!("Webhook ignored: {}", e);
            (StatusCode::TOO_MANY_REQUESTS, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Webhook failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
