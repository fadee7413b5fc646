//! HTTP API route definitions.

use axum::{routing::any, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{snapshot, AppState};

/// Create the API router.
///
/// The snapshot is served for every method at `/` and as the fallback for
/// every other path, so the Functions host can forward any route to it.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(snapshot))
        .fallback(snapshot)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
