//! # roster-core
//!
//! Domain layer containing the attendance roster entities, value objects,
//! and the ports (repository, member directory, chat client) the service
//! layer talks through. This crate has zero dependencies on infrastructure.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActionRow, ActiveEvent, Attendance, AttendanceIssue, AttendanceRecord, Button, ButtonStyle,
    Embed, EmbedField, EmbedFooter, EventAttendee, IssueRecord, Member, Message, MessageSend,
    Rank,
};
pub use error::DomainError;
pub use traits::{
    ActiveEventRepository, AttendanceFilter, AttendanceRepository, ChatClient, MemberDirectory,
    RepoResult,
};
pub use value_objects::{AttendanceId, ChannelId, MemberId, MessageId, Snowflake, SnowflakeGenerator};
