//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::warn;

use crate::elevator::{build_snapshot, Snapshot};
use crate::error::{Result, SnapshotError};
use crate::metrics;
use crate::store::{fetch_elevator_states, ElevatorStore};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where elevator records are read from.
    pub store: Arc<dyn ElevatorStore>,
}

impl AppState {
    /// Create new app state.
    pub fn new(store: impl ElevatorStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Fetch elevator records and expand them into a snapshot.
pub async fn load_snapshot(store: &dyn ElevatorStore) -> Result<Snapshot> {
    let elevators = fetch_elevator_states(store).await?;
    Ok(build_snapshot(elevators)?)
}

/// Snapshot handler - serves every path.
///
/// Store and grid failures are reported as `502 Bad Gateway`.
pub async fn snapshot(
    State(state): State<AppState>,
) -> std::result::Result<Json<Snapshot>, SnapshotError> {
    let _timer = metrics::timer_snapshot_request();
    metrics::inc_snapshot_requests();

    match load_snapshot(state.store.as_ref()).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            warn!(reason = e.reason(), error = %e, "Snapshot request failed");
            metrics::inc_snapshot_failures(e.reason());
            Err(e)
        }
    }
}
