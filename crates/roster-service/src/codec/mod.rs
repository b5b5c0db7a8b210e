//! Chat representation of rosters and event boards
//!
//! [`format`] holds the grammar; [`render`] and [`parse_thread`] are its two
//! directions.

mod components;
mod error;
mod event_board;
pub mod format;
mod parse;
mod render;

pub use components::{Component, EventComponent, RosterAction, RosterComponent};
pub use error::CodecError;
pub use event_board::{render_board, render_summary};
pub use parse::{parse_attendance_id, parse_thread, ThreadRoster};
pub use render::render;
