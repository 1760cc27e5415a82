//! HTTP endpoint for the search service.
//!
//! Routes:
//! - `GET /api/search?q=<query>&limit=<n>` returns `{query, total, results}`
//! - `GET /healthz` reports liveness and whether the index has been built
//!
//! Any failure inside the search core is answered with `500 {"error": "internal"}`; the
//! detail only goes to the log.

use std::{fmt, io, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use quill_index::SearchService;
use serde::Deserialize;
use serde_json::json;
use tokio::{net::TcpListener, signal, task};
use tracing::{debug, error, info};

/// Query-string parameters of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    pub q: Option<String>,
    /// Raw limit. Normalized by [`SearchService::clamp_limit`], never rejected.
    pub limit: Option<String>,
}

/// Builds the application router over a shared service.
pub fn router(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/healthz", get(healthz))
        .with_state(service)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(service: Arc<SearchService>, addr: &str) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// GET /api/search
async fn search(
    State(service): State<Arc<SearchService>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    let limit = service.clamp_limit(params.limit.as_deref());
    debug!(query = %query, limit, "search request");

    // The first query may build the index, which is CPU-bound.
    let worker = Arc::clone(&service);
    match task::spawn_blocking(move || worker.search(&query, limit)).await {
        Ok(Ok(response)) => Json(response).into_response(),
        Ok(Err(e)) => internal_error(&e),
        Err(e) => internal_error(&e),
    }
}

/// GET /healthz
async fn healthz(State(service): State<Arc<SearchService>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "indexed": service.is_built(),
    }))
}

/// Logs `err` and returns the generic 500 body.
fn internal_error(err: &dyn fmt::Display) -> Response {
    error!(error = %err, "search request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal" })),
    )
        .into_response()
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "could not listen for shutdown signal");
        return;
    }
    info!("shutting down");
}
