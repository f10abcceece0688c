//! Axum HTTP surface for link previews.
//!
//! - `POST /link-preview` with `{"url": "..."}`
//! - `GET /health`
//!
//! Bodies are capped at 16KB and every request is bounded by the fetch
//! timeout plus a small grace period.

mod handlers;

pub use handlers::preview_response;

use crate::config::AppConfig;
use crate::{LinkPreviewer, PreviewError};
use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (16KB)
pub const MAX_BODY_SIZE: usize = 16_384;
/// Extra time on top of the fetch timeout before the server gives up
pub const REQUEST_GRACE_SECS: u64 = 5;

pub const PREVIEW_ROUTE: &str = "/link-preview";

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub previewer: Arc<LinkPreviewer>,
}

pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    let request_timeout =
        state.previewer.fetcher().timeout() + Duration::from_secs(REQUEST_GRACE_SECS);

    Router::new()
        .route("/health", get(handlers::handle_health))
        .route(PREVIEW_ROUTE, post(handlers::handle_preview))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

/// Bind `config.server.bind` and serve until the process exits
pub async fn serve(config: &AppConfig) -> Result<(), PreviewError> {
    let previewer = LinkPreviewer::from_config(&config.preview)?;
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    serve_on(listener, previewer, &config.server.cors_origins).await
}

/// Serve on an already bound listener
pub async fn serve_on(
    listener: tokio::net::TcpListener,
    previewer: LinkPreviewer,
    cors_origins: &[String],
) -> Result<(), PreviewError> {
    let state = AppState {
        previewer: Arc::new(previewer),
    };
    let app = build_app(state, cors_origins);

    info!("Link preview server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
