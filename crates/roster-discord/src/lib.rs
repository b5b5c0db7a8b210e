//! # roster-discord
//!
//! Discord REST implementation of the [`roster_core::ChatClient`] port:
//! sends, edits, deletes and fetches messages, translating between Discord's
//! wire payloads and the platform-neutral message model.

pub mod client;
pub mod error;
pub mod payloads;

pub use client::DiscordClient;
pub use error::DiscordError;
