//! Mock elevator store for unit testing.
//!
//! This module provides a store that can be used in tests
//! without making real network requests.

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};

use super::ElevatorStore;
use crate::elevator::ElevatorState;
use crate::error::StoreError;

/// Configuration for mock store behavior.
#[derive(Debug, Clone, Default)]
pub struct MockStoreConfig {
    /// Whether to fail queries.
    pub fail_query: bool,
}

/// Mock elevator store for testing.
#[derive(Debug, Clone, Default)]
pub struct MockElevatorStore {
    /// Mock configuration.
    config: MockStoreConfig,
    /// Records returned by every query.
    elevators: Arc<Mutex<Vec<ElevatorState>>>,
}

impl MockElevatorStore {
    /// Create a new mock store with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store with custom configuration.
    pub fn with_config(config: MockStoreConfig) -> Self {
        Self {
            config,
            elevators: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the records returned by queries.
    pub fn set_elevators(&self, elevators: Vec<ElevatorState>) {
        if let Ok(mut stored) = self.elevators.lock() {
            *stored = elevators;
        }
    }

    /// Clear all mock data.
    pub fn clear(&self) {
        self.set_elevators(Vec::new());
    }
}

impl ElevatorStore for MockElevatorStore {
    fn query_elevators(&self) -> BoxFuture<'_, Result<Vec<ElevatorState>, StoreError>> {
        async move {
            if self.config.fail_query {
                return Err(StoreError::Status {
                    status: 503,
                    body: "Mock query failure".to_string(),
                });
            }

            let elevators = self
                .elevators
                .lock()
                .map(|stored| stored.clone())
                .unwrap_or_default();
            Ok(elevators)
        }
        .boxed()
    }
}
