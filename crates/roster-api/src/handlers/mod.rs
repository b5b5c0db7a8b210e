//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod attendance;
pub mod events;
pub mod health;
pub mod interactions;
pub mod members;
