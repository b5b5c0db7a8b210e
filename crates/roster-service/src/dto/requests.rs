//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Attendance Requests
// ============================================================================

/// Open a new roster
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttendanceRequest {
    /// Rendered as the embed title, which chat platforms cap at 256
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "submitted_by must be 1-64 characters"))]
    pub submitted_by: String,
}

/// Query for listing open rosters
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListAttendanceQuery {
    /// Max rosters to return; 0 or absent means all
    #[validate(range(max = 1000, message = "Limit must be at most 1000"))]
    pub limit: Option<usize>,
}

/// Render a roster into chat
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PublishAttendanceRequest {
    /// Target channel; defaults to where it was last published, then the
    /// configured attendance channel
    #[validate(length(min = 1, message = "channel_id must not be empty"))]
    pub channel_id: Option<String>,
}

/// Rebuild a roster from a chat thread
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportThreadRequest {
    #[validate(length(min = 1, message = "channel_id must not be empty"))]
    pub channel_id: String,

    /// Messages to fetch from the end of the thread
    #[validate(range(min = 2, max = 100, message = "Limit must be between 2 and 100"))]
    pub limit: Option<usize>,
}

// ============================================================================
// Member Requests
// ============================================================================

/// Query for listing directory members
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListMembersQuery {
    /// Max members to return; 0 or absent means all
    #[validate(range(max = 1000, message = "Limit must be at most 1000"))]
    pub limit: Option<usize>,
}

/// Full directory record for one member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Defaults to guest
    pub rank: Option<String>,

    #[serde(default)]
    pub is_bot: bool,

    #[serde(default)]
    pub rsi_member: bool,

    #[serde(default)]
    pub bad_affiliation: bool,

    #[serde(default)]
    pub validated: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetRankRequest {
    #[validate(length(min = 1, max = 32, message = "Rank must be 1-32 characters"))]
    pub rank: String,
}

// ============================================================================
// Interaction Requests
// ============================================================================

/// A button press forwarded from the chat platform
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InteractionRequest {
    #[validate(length(min = 1, message = "channel_id must not be empty"))]
    pub channel_id: String,

    #[validate(length(min = 1, max = 100, message = "custom_id must be 1-100 characters"))]
    pub custom_id: String,
}

// ============================================================================
// Event Requests
// ============================================================================

/// Start a voice attendance board
///
/// An empty participant list is accepted here and rejected by the service
/// with the user-facing message.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartEventRequest {
    #[validate(length(min = 1, message = "started_by must not be empty"))]
    pub started_by: String,

    #[serde(default)]
    pub participants: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_attendance_validation() {
        let ok = CreateAttendanceRequest {
            name: "Mining Op".to_string(),
            submitted_by: "u1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreateAttendanceRequest {
            name: String::new(),
            ..ok.clone()
        };
        assert!(empty.validate().is_err());

        let long = CreateAttendanceRequest {
            name: "x".repeat(257),
            ..ok
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_import_limit_bounds() {
        let req: ImportThreadRequest =
            serde_json::from_str(r#"{"channel_id":"t1","limit":1}"#).unwrap();
        assert!(req.validate().is_err());

        let req: ImportThreadRequest = serde_json::from_str(r#"{"channel_id":"t1"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_upsert_member_defaults_flags() {
        let req: UpsertMemberRequest = serde_json::from_str(r#"{"name":"One"}"#).unwrap();
        assert!(req.rank.is_none());
        assert!(!req.is_bot && !req.rsi_member && !req.validated);
        assert!(req.validate().is_ok());

        let req: UpsertMemberRequest = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_start_event_defaults_participants() {
        let req: StartEventRequest = serde_json::from_str(r#"{"started_by":"u1"}"#).unwrap();
        assert!(req.participants.is_empty());
        assert!(req.validate().is_ok());
    }
}
