//! Path parameter extractors
//!
//! Chat platform ids are opaque strings; the only check here is that a
//! segment is not blank.

use roster_core::{AttendanceId, ChannelId, MemberId};
use serde::Deserialize;

use crate::response::ApiError;

fn non_blank<'a>(value: &'a str, name: &str) -> Result<&'a str, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ApiError::invalid_path(format!("{name} must not be empty")))
    } else {
        Ok(value)
    }
}

/// `/attendance/:id`
#[derive(Debug, Deserialize)]
pub struct AttendancePath {
    pub id: String,
}

impl AttendancePath {
    pub fn id(&self) -> Result<AttendanceId, ApiError> {
        non_blank(&self.id, "id").map(AttendanceId::from)
    }
}

/// `/attendance/:id/members/:member_id`
#[derive(Debug, Deserialize)]
pub struct AttendanceMemberPath {
    pub id: String,
    pub member_id: String,
}

impl AttendanceMemberPath {
    pub fn id(&self) -> Result<AttendanceId, ApiError> {
        non_blank(&self.id, "id").map(AttendanceId::from)
    }

    pub fn member_id(&self) -> Result<MemberId, ApiError> {
        non_blank(&self.member_id, "member_id").map(MemberId::from)
    }
}

/// `/members/:member_id`
#[derive(Debug, Deserialize)]
pub struct MemberPath {
    pub member_id: String,
}

impl MemberPath {
    pub fn member_id(&self) -> Result<MemberId, ApiError> {
        non_blank(&self.member_id, "member_id").map(MemberId::from)
    }
}

/// `/channels/:channel_id`
#[derive(Debug, Deserialize)]
pub struct ChannelPath {
    pub channel_id: String,
}

impl ChannelPath {
    pub fn channel_id(&self) -> Result<ChannelId, ApiError> {
        non_blank(&self.channel_id, "channel_id").map(ChannelId::from)
    }
}

/// `/channels/:channel_id/.../:member_id`
#[derive(Debug, Deserialize)]
pub struct ChannelMemberPath {
    pub channel_id: String,
    pub member_id: String,
}

impl ChannelMemberPath {
    pub fn channel_id(&self) -> Result<ChannelId, ApiError> {
        non_blank(&self.channel_id, "channel_id").map(ChannelId::from)
    }

    pub fn member_id(&self) -> Result<MemberId, ApiError> {
        non_blank(&self.member_id, "member_id").map(MemberId::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_segment_is_rejected() {
        let path = AttendanceMemberPath {
            id: "r1".to_string(),
            member_id: "  ".to_string(),
        };
        assert_eq!(path.id().unwrap(), AttendanceId::from("r1"));
        assert_eq!(path.member_id().unwrap_err().error_code(), "INVALID_PATH_PARAMETER");
    }

    #[test]
    fn test_segment_is_trimmed() {
        let path = ChannelPath {
            channel_id: " 123 ".to_string(),
        };
        assert_eq!(path.channel_id().unwrap(), ChannelId::from("123"));
    }
}
