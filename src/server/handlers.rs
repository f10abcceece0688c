use crate::model::{PreviewRequest, PreviewResponse};
use crate::{LinkPreviewer, PreviewError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, warn};

use super::AppState;

const INTERNAL_ERROR_MESSAGE: &str = "Failed to fetch link preview";

/// GET /health
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// POST /link-preview
pub(super) async fn handle_preview(
    State(state): State<AppState>,
    body: Result<Json<PreviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(body) => body,
        Err(e) => {
            warn!("Rejected preview request: {}", e);
            let err = PreviewError::InvalidRequest(e.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(PreviewResponse::failure(err.to_string())),
            );
        }
    };

    let (status, response) = preview_response(&state.previewer, request).await;
    (status, Json(response))
}

/// Map a preview request onto a status code and response envelope.
///
/// A missing or blank `url` is the only client error. Degraded fetches are
/// successful responses carrying domain-only data.
pub async fn preview_response(
    previewer: &LinkPreviewer,
    request: PreviewRequest,
) -> (StatusCode, PreviewResponse) {
    let Some(url) = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            PreviewResponse::failure(PreviewError::MissingUrl.to_string()),
        );
    };

    match previewer.preview(url).await {
        Ok(data) => (StatusCode::OK, PreviewResponse::ok(data)),
        Err(e) => {
            error!("Link preview for {} failed: {}", url, e);
            let message = e.to_string();
            let message = if message.is_empty() {
                INTERNAL_ERROR_MESSAGE.to_string()
            } else {
                message
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                PreviewResponse::failure(message),
            )
        }
    }
}
