//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Attendance Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub name: String,
    pub rank: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueResponse {
    pub member: MemberResponse,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceResponse {
    pub id: String,
    pub name: String,
    pub submitted_by: String,
    pub members: Vec<MemberResponse>,
    pub issues: Vec<IssueResponse>,
    pub recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Directory record with the member's eligibility verdict
#[derive(Debug, Clone, Serialize)]
pub struct MemberDetailResponse {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub is_bot: bool,
    pub rsi_member: bool,
    pub bad_affiliation: bool,
    pub validated: bool,
    pub issues: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Recorded rosters a member was counted in
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceCountResponse {
    pub member_id: String,
    pub count: u64,
}

// ============================================================================
// Event Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EventAttendeeResponse {
    pub member_id: String,
    pub label: String,
    pub attended: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveEventResponse {
    pub channel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub started_by: String,
    pub attendees: Vec<EventAttendeeResponse>,
    pub started_at: DateTime<Utc>,
}

/// Chat message the service posted
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub channel_id: String,
    pub content: String,
}

// ============================================================================
// Interaction Responses
// ============================================================================

/// What a button press did
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionResponse {
    RosterUpdated { attendance: AttendanceResponse },
    RosterDeleted { attendance_id: String },
    EventUpdated { event: ActiveEventResponse },
    EventSubmitted { message: MessageResponse },
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
