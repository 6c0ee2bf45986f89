//! HTTP serving of the pre-built dashboard.
//!
//! The build phase is synchronous and runs to completion before anything
//! listens; this module only hands out immutable, pre-rendered content. There
//! is exactly one writer (startup) and many read-only request handlers, so no
//! locking is needed: the whole context lives behind an `Arc`.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::DashConfig;
use crate::error::AppError;

/// Immutable application state shared across requests.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// The fully rendered dashboard page.
    pub page: String,
    /// Number of charts embedded in the page (for the health route).
    pub chart_count: usize,
}

/// Run the serving loop until the process is stopped.
///
/// The rest of the program is synchronous; the tokio runtime lives entirely
/// inside this call.
pub fn serve(ctx: AppContext, config: &DashConfig) -> Result<(), AppError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::server(format!("Failed to start async runtime: {e}")))?;
    runtime.block_on(serve_async(Arc::new(ctx), config.bind_addr()))
}

async fn serve_async(ctx: Arc<AppContext>, addr: String) -> Result<(), AppError> {
    let app = router(ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::server(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "dashboard listening");
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::server(format!("Server error: {e}")))
}

/// Build the router; split out so tests can drive it without a socket.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn index(State(ctx): State<Arc<AppContext>>) -> Html<String> {
    // Every request re-serves the same immutable page bytes.
    Html(ctx.page.clone())
}

async fn healthz(State(ctx): State<Arc<AppContext>>) -> String {
    format!("ok ({} charts)", ctx.chart_count)
}
