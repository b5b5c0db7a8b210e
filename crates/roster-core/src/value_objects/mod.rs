//! Value objects - immutable types that represent domain concepts

mod ids;
mod snowflake;

pub use ids::{AttendanceId, ChannelId, MemberId, MessageId};
pub use snowflake::{Snowflake, SnowflakeGenerator};
