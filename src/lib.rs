//! Elevator snapshot service.
//!
//! Reads elevator-simulation state from Cosmos DB and serves it as a JSON
//! snapshot: the elevator records plus a dense door grid with one entry per
//! shaft per floor.
//!
//! ```text
//! Cosmos DB "elevator" container
//!   ──▶ fetch (4 records, id <= "4")
//!   ──▶ expand (4 shafts × 6 floors = 24 doors)
//!   ──▶ GET /  { elevatorState, elevatorDoorState }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`elevator`]: Elevator records and door grid expansion
//! - [`store`]: Cosmos DB client and mock store
//! - [`api`]: HTTP router and snapshot handler
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod elevator;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{Result, SnapshotError};
