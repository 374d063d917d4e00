//! Testing utilities for sprintpilot pipelines.
//!
//! This module provides:
//! - A scripted transport that records requests
//! - Sample backend responses for each stage
//! - Assertions for gate errors and store contents

mod assertions;
pub mod fixtures;
mod mocks;

pub use assertions::{assert_gated, assert_not_stored, assert_stored, assert_transport_failed};
pub use mocks::{RecordedCall, ScriptedTransport};
