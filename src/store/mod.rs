//! Elevator state store.
//!
//! This module handles:
//! - The [`ElevatorStore`] seam the HTTP layer fetches through
//! - The Cosmos DB REST client and its master-key signing
//! - Mock store for testing

pub mod auth;
pub mod cosmos;
pub mod mock;

use std::time::Instant;

use futures::future::BoxFuture;
use tracing::{error, info};

use crate::elevator::ElevatorState;
use crate::error::StoreError;
use crate::metrics;

pub use cosmos::CosmosClient;
pub use mock::{MockElevatorStore, MockStoreConfig};

/// Container holding one document per elevator.
pub const ELEVATOR_CONTAINER: &str = "elevator";

/// Source of raw elevator records.
pub trait ElevatorStore: Send + Sync {
    /// Query the elevator documents, one per shaft.
    fn query_elevators(&self) -> BoxFuture<'_, Result<Vec<ElevatorState>, StoreError>>;
}

/// Fetch elevator records and derive each `elevator_number` from its `id`.
pub async fn fetch_elevator_states(
    store: &dyn ElevatorStore,
) -> Result<Vec<ElevatorState>, StoreError> {
    let start = Instant::now();
    let result = store.query_elevators().await;
    metrics::record_store_query_latency(start);

    let mut elevators = result.map_err(|e| {
        error!(error = ?e, "Elevator query failed");
        e
    })?;

    for elevator in &mut elevators {
        elevator.assign_number_from_id();
    }

    metrics::add_store_documents(elevators.len());
    info!(count = elevators.len(), "Fetched elevator states");

    Ok(elevators)
}
