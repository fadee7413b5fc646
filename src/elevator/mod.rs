//! Elevator domain module.
//!
//! This module handles:
//! - Elevator state records and enum codes
//! - Door grid expansion and snapshot assembly

pub mod grid;
pub mod types;

pub use grid::{build_snapshot, door_is_open, expand_door_grid};
pub use types::{
    ElevatorDirection, ElevatorDoorState, ElevatorState, ElevatorStatus, Snapshot, DOOR_COUNT,
    ELEVATOR_COUNT, FLOOR_COUNT,
};
