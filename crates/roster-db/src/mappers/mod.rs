//! Record ↔ model mappers
//!
//! `From<Model>` impls convert rows into core records and entities;
//! `*Insert` structs borrow the values bound by write queries.

mod active_event;
mod attendance;
mod member;

pub use active_event::ActiveEventInsert;
pub use attendance::AttendanceInsert;
pub use member::MemberInsert;
