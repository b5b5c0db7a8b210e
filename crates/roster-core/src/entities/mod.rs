//! Domain entities - core business objects

mod active_event;
mod attendance;
mod member;
mod message;
mod record;

pub use active_event::{ActiveEvent, EventAttendee};
pub use attendance::{Attendance, AttendanceIssue};
pub use member::{Member, Rank};
pub use message::{ActionRow, Button, ButtonStyle, Embed, EmbedField, EmbedFooter, Message, MessageSend};
pub use record::{AttendanceRecord, IssueRecord};
