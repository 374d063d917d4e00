//! Test assertions for stage runs and stores.

use crate::core::{StageRun, StoreKey};
use crate::errors::{Result, SprintPilotError};
use crate::store::StageStore;

/// Asserts that the result is a gate error with the given message.
pub fn assert_gated(result: &Result<StageRun>, expected_message: &str) {
    match result {
        Err(SprintPilotError::Gate(gate)) => assert_eq!(
            gate.message, expected_message,
            "Gate message mismatch for {}",
            gate.stage
        ),
        other => panic!("Expected gate error '{expected_message}', got {other:?}"),
    }
}

/// Asserts that the result is a transport error with the given message.
pub fn assert_transport_failed(result: &Result<StageRun>, expected_message: &str) {
    match result {
        Err(SprintPilotError::Transport(err)) => assert_eq!(err.to_string(), expected_message),
        other => panic!("Expected transport error '{expected_message}', got {other:?}"),
    }
}

/// Asserts that `key` holds exactly `expected`.
pub fn assert_stored(store: &dyn StageStore, key: StoreKey, expected: &serde_json::Value) {
    let actual = store.get(key).expect("store read failed");
    assert_eq!(
        actual.as_ref(),
        Some(expected),
        "Unexpected value under {key}"
    );
}

/// Asserts that `key` holds nothing.
pub fn assert_not_stored(store: &dyn StageStore, key: StoreKey) {
    let actual = store.get(key).expect("store read failed");
    assert!(actual.is_none(), "Expected {key} to be absent, found {actual:?}");
}
