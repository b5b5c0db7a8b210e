//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in roster-core.

mod active_event;
mod attendance;
mod error;
mod member;

pub use active_event::PgActiveEventRepository;
pub use attendance::PgAttendanceRepository;
pub use member::PgMemberDirectory;
