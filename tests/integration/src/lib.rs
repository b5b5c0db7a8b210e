//! Integration test utilities for the roster API
//!
//! Spawns the full Axum application over in-memory ports and drives it
//! over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
