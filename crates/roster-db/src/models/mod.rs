//! Database models - SQLx-compatible structs for PostgreSQL tables

mod active_event;
mod attendance;
mod member;

pub use active_event::ActiveEventModel;
pub use attendance::AttendanceModel;
pub use member::MemberModel;
