//! Integration tests for the elevator snapshot service.
//!
//! These tests require `DbUrl`, `DbKey` and `DbName` pointing at a Cosmos
//! account whose `elevator` container holds the four elevator documents.
//! Run with: cargo test --test integration -- --ignored
//!
//! Note: These tests query the real store.

use elevator_snapshot::api::load_snapshot;
use elevator_snapshot::config::Config;
use elevator_snapshot::elevator::{DOOR_COUNT, ELEVATOR_COUNT};
use elevator_snapshot::store::{fetch_elevator_states, CosmosClient};

/// Get a test config from environment.
fn test_config() -> Option<Config> {
    let config = Config::load().ok()?;

    if config.db_url.is_empty() || config.db_key.is_empty() || config.db_name.is_empty() {
        return None;
    }

    Some(config)
}

/// Test that the elevator query returns the expected documents.
#[tokio::test]
#[ignore = "requires DbUrl, DbKey and DbName"]
async fn test_fetch_elevator_states() {
    let config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: Cosmos connection variables not set");
            return;
        }
    };

    let client = CosmosClient::new(&config).expect("client");

    let result = fetch_elevator_states(&client).await;
    assert!(result.is_ok(), "Failed to query elevators: {:?}", result.err());

    let elevators = result.unwrap();
    assert!(
        elevators.len() >= ELEVATOR_COUNT,
        "Expected at least {} elevators, got {}",
        ELEVATOR_COUNT,
        elevators.len()
    );
    for elevator in &elevators {
        assert_eq!(elevator.id.parse::<i32>().unwrap_or_default(), elevator.elevator_number);
    }

    println!("Fetched {} elevators", elevators.len());
}

/// Test that a full snapshot can be built from the live store.
#[tokio::test]
#[ignore = "requires DbUrl, DbKey and DbName"]
async fn test_load_snapshot() {
    let config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: Cosmos connection variables not set");
            return;
        }
    };

    let client = CosmosClient::new(&config).expect("client");

    let result = load_snapshot(&client).await;
    assert!(result.is_ok(), "Failed to load snapshot: {:?}", result.err());

    let snapshot = result.unwrap();
    assert_eq!(snapshot.elevator_door_state.len(), DOOR_COUNT);

    let open = snapshot.elevator_door_state.iter().filter(|d| d.open).count();
    println!("Open doors: {}", open);
}

/// Test that a wrong key is reported as a store failure, not a panic.
#[tokio::test]
#[ignore = "requires DbUrl and DbName"]
async fn test_wrong_key_is_rejected() {
    let mut config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: Cosmos connection variables not set");
            return;
        }
    };
    config.db_key = "d3Jvbmcta2V5".to_string();

    let client = CosmosClient::new(&config).expect("client");

    let result = fetch_elevator_states(&client).await;
    assert!(result.is_err(), "Expected authorization failure");
}
