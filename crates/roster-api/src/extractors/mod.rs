//! Axum extractors for request handling
//!
//! Custom extractors for validation and typed path parameters.

mod path;
mod validated;

pub use path::{AttendanceMemberPath, AttendancePath, ChannelMemberPath, ChannelPath, MemberPath};
pub use validated::{OptionalValidatedJson, ValidatedJson, ValidatedQuery};
