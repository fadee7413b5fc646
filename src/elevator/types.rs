//! Elevator state records and the derived snapshot payload.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::UnknownCode;

/// Number of elevator shafts in the building.
pub const ELEVATOR_COUNT: usize = 4;

/// Number of floors served, numbered from 1.
pub const FLOOR_COUNT: i32 = 6;

/// One door per shaft per floor.
pub const DOOR_COUNT: usize = ELEVATOR_COUNT * FLOOR_COUNT as usize;

/// Travel direction of an elevator car. Stored and served as its integer code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(try_from = "i16", into = "i16")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ElevatorDirection {
    /// Moving up.
    Up,
    /// Moving down.
    Down,
    /// Idle.
    None,
}

impl ElevatorDirection {
    /// Wire code of this direction.
    pub fn code(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => 2,
            Self::None => 3,
        }
    }
}

impl TryFrom<i16> for ElevatorDirection {
    type Error = UnknownCode;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Up),
            2 => Ok(Self::Down),
            3 => Ok(Self::None),
            _ => Err(UnknownCode {
                kind: "direction",
                code,
            }),
        }
    }
}

impl From<ElevatorDirection> for i16 {
    fn from(direction: ElevatorDirection) -> Self {
        direction.code()
    }
}

/// Motion/door status of an elevator car. Stored and served as its integer code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(try_from = "i16", into = "i16")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ElevatorStatus {
    /// Travelling between floors.
    Moving,
    /// Stopped at a floor with doors shut.
    AtFloor,
    /// Stopped with doors opening.
    DoorsOpening,
    /// Stopped with doors closing.
    DoorsClosing,
}

impl ElevatorStatus {
    /// Wire code of this status.
    pub fn code(self) -> i16 {
        match self {
            Self::Moving => 1,
            Self::AtFloor => 2,
            Self::DoorsOpening => 3,
            Self::DoorsClosing => 4,
        }
    }
}

impl TryFrom<i16> for ElevatorStatus {
    type Error = UnknownCode;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Moving),
            2 => Ok(Self::AtFloor),
            3 => Ok(Self::DoorsOpening),
            4 => Ok(Self::DoorsClosing),
            _ => Err(UnknownCode {
                kind: "status",
                code,
            }),
        }
    }
}

impl From<ElevatorStatus> for i16 {
    fn from(status: ElevatorStatus) -> Self {
        status.code()
    }
}

/// One elevator document from the `elevator` container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorState {
    /// Numeric shaft number, derived from `id` after fetching.
    #[serde(default)]
    pub elevator_number: i32,
    /// Travel direction.
    pub direction: ElevatorDirection,
    /// Motion/door status.
    pub elevator_status: ElevatorStatus,
    /// Floor the current trip started from.
    #[serde(default)]
    pub from_floor: i32,
    /// Floor the current trip is heading to.
    #[serde(default)]
    pub to_floor: i32,
    /// Trip progress as reported by the simulation.
    #[serde(default)]
    pub progress: i32,
    /// Floor the car currently occupies.
    #[serde(default)]
    pub at_floor: i32,
    /// Document id; a decimal elevator number.
    pub id: String,
}

impl ElevatorState {
    /// Set `elevator_number` from `id`. A non-numeric id yields 0.
    pub fn assign_number_from_id(&mut self) {
        self.elevator_number = self.id.parse().unwrap_or_default();
    }
}

/// Open/closed state of one shaft door on one floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevatorDoorState {
    /// Shaft the door belongs to.
    pub elevator_shaft_number: i32,
    /// Floor of the door, from 1.
    pub floor: i32,
    /// Whether the door is open.
    pub open: bool,
    /// Floor the shaft's car is currently at.
    pub elevator_at_floor: i32,
    /// Raw code copied from the car's status, not its direction.
    ///
    /// Consumers of the snapshot read this field as-is, so it keeps the
    /// status code (1..=4) rather than an [`ElevatorDirection`].
    pub elevator_direction: i16,
}

/// Full response payload: elevator records plus the derived door grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Elevator records as fetched, with parsed numbers.
    pub elevator_state: Vec<ElevatorState>,
    /// One entry per shaft per floor, shaft-major.
    pub elevator_door_state: Vec<ElevatorDoorState>,
}

impl Snapshot {
    /// Number of doors currently open across the grid.
    pub fn open_door_count(&self) -> usize {
        self.elevator_door_state.iter().filter(|d| d.open).count()
    }
}
