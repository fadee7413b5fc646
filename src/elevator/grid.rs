//! Door grid expansion.
//!
//! Turns the sparse per-elevator records into one door entry per shaft per
//! floor, then assembles the [`Snapshot`].
//!
//! Shafts are taken by position in the fetched list, not by matching
//! `elevator_number`. Out-of-order results from the store therefore label
//! doors by list position.

use tracing::{debug, info, instrument};

use super::types::{
    ElevatorDoorState, ElevatorState, ElevatorStatus, Snapshot, DOOR_COUNT, ELEVATOR_COUNT,
    FLOOR_COUNT,
};
use crate::error::GridError;

/// Whether the car's door on `floor` is open.
pub fn door_is_open(elevator: &ElevatorState, floor: i32) -> bool {
    elevator.elevator_status == ElevatorStatus::DoorsOpening && elevator.at_floor == floor
}

/// Expand elevator records into the full door grid.
///
/// Uses the first [`ELEVATOR_COUNT`] records. Returns
/// [`GridError::NotEnoughElevators`] if fewer are available.
pub fn expand_door_grid(elevators: &[ElevatorState]) -> Result<Vec<ElevatorDoorState>, GridError> {
    let shafts = elevators
        .get(..ELEVATOR_COUNT)
        .ok_or(GridError::NotEnoughElevators {
            expected: ELEVATOR_COUNT,
            found: elevators.len(),
        })?;

    let mut doors = Vec::with_capacity(DOOR_COUNT);
    for elevator in shafts {
        for floor in 1..=FLOOR_COUNT {
            doors.push(ElevatorDoorState {
                elevator_shaft_number: elevator.elevator_number,
                floor,
                open: door_is_open(elevator, floor),
                elevator_at_floor: elevator.at_floor,
                elevator_direction: elevator.elevator_status.code(),
            });
        }
    }

    Ok(doors)
}

/// Assemble the snapshot from fetched records.
#[instrument(skip_all, fields(elevators = elevators.len()))]
pub fn build_snapshot(elevators: Vec<ElevatorState>) -> Result<Snapshot, GridError> {
    let doors = expand_door_grid(&elevators)?;

    let snapshot = Snapshot {
        elevator_state: elevators,
        elevator_door_state: doors,
    };

    info!(
        elevators = snapshot.elevator_state.len(),
        doors = snapshot.elevator_door_state.len(),
        open_doors = snapshot.open_door_count(),
        "Snapshot built"
    );
    debug!("Snapshot: {:?}", snapshot);

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevator::types::ElevatorDirection;
    use pretty_assertions::assert_eq;

    fn elevator(id: &str, status: ElevatorStatus, at_floor: i32) -> ElevatorState {
        let mut state = ElevatorState {
            elevator_number: 0,
            direction: ElevatorDirection::None,
            elevator_status: status,
            from_floor: at_floor,
            to_floor: at_floor,
            progress: 0,
            at_floor,
            id: id.to_string(),
        };
        state.assign_number_from_id();
        state
    }

    fn scenario() -> Vec<ElevatorState> {
        vec![
            elevator("1", ElevatorStatus::AtFloor, 1),
            elevator("2", ElevatorStatus::DoorsOpening, 3),
            elevator("3", ElevatorStatus::Moving, 5),
            elevator("4", ElevatorStatus::DoorsClosing, 2),
        ]
    }

    #[test]
    fn grid_has_one_block_of_floors_per_shaft() {
        let doors = expand_door_grid(&scenario()).unwrap();
        assert_eq!(doors.len(), DOOR_COUNT);

        for (block, chunk) in doors.chunks(FLOOR_COUNT as usize).enumerate() {
            let floors: Vec<i32> = chunk.iter().map(|d| d.floor).collect();
            assert_eq!(floors, vec![1, 2, 3, 4, 5, 6]);
            assert!(chunk
                .iter()
                .all(|d| d.elevator_shaft_number == block as i32 + 1));
        }
    }

    #[test]
    fn only_opening_door_at_current_floor_is_open() {
        let doors = expand_door_grid(&scenario()).unwrap();
        let open: Vec<(i32, i32)> = doors
            .iter()
            .filter(|d| d.open)
            .map(|d| (d.elevator_shaft_number, d.floor))
            .collect();

        assert_eq!(open, vec![(2, 3)]);
    }

    #[test]
    fn door_open_requires_doors_opening_status() {
        for status in [
            ElevatorStatus::Moving,
            ElevatorStatus::AtFloor,
            ElevatorStatus::DoorsClosing,
        ] {
            assert!(!door_is_open(&elevator("1", status, 4), 4));
        }
        assert!(door_is_open(&elevator("1", ElevatorStatus::DoorsOpening, 4), 4));
        assert!(!door_is_open(&elevator("1", ElevatorStatus::DoorsOpening, 4), 3));
    }

    #[test]
    fn door_carries_status_code_and_current_floor() {
        let doors = expand_door_grid(&scenario()).unwrap();
        let fourth_shaft = &doors[18..24];

        assert!(fourth_shaft.iter().all(|d| d.elevator_direction == 4));
        assert!(fourth_shaft.iter().all(|d| d.elevator_at_floor == 2));
    }

    #[test]
    fn shafts_are_positional() {
        let mut elevators = scenario();
        elevators.swap(0, 3);

        let doors = expand_door_grid(&elevators).unwrap();
        assert_eq!(doors[0].elevator_shaft_number, 4);
        assert_eq!(doors[23].elevator_shaft_number, 1);
    }

    #[test]
    fn empty_fetch_is_a_shape_error() {
        assert_eq!(
            expand_door_grid(&[]),
            Err(GridError::NotEnoughElevators {
                expected: ELEVATOR_COUNT,
                found: 0,
            })
        );
    }

    #[test]
    fn short_fetch_is_a_shape_error() {
        let mut elevators = scenario();
        elevators.pop();

        let err = build_snapshot(elevators).unwrap_err();
        assert_eq!(
            err,
            GridError::NotEnoughElevators {
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn extra_records_are_kept_but_not_expanded() {
        let mut elevators = scenario();
        elevators.push(elevator("5", ElevatorStatus::DoorsOpening, 1));

        let snapshot = build_snapshot(elevators).unwrap();
        assert_eq!(snapshot.elevator_state.len(), 5);
        assert_eq!(snapshot.elevator_door_state.len(), DOOR_COUNT);
    }

    #[test]
    fn snapshot_counts_open_doors() {
        let snapshot = build_snapshot(scenario()).unwrap();
        assert_eq!(snapshot.open_door_count(), 1);

        let mut elevators = scenario();
        elevators[0].elevator_status = ElevatorStatus::DoorsOpening;
        assert_eq!(build_snapshot(elevators).unwrap().open_door_count(), 2);
    }

    #[test]
    fn snapshot_json_round_trips() {
        let snapshot = build_snapshot(scenario()).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn snapshot_uses_wire_field_names() {
        let snapshot = build_snapshot(scenario()).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(
            value["elevatorDoorState"][8],
            serde_json::json!({
                "elevatorShaftNumber": 2,
                "floor": 3,
                "open": true,
                "elevatorAtFloor": 3,
                "elevatorDirection": 3
            })
        );
        assert_eq!(value["elevatorState"][1]["elevatorNumber"], 2);
    }
}
