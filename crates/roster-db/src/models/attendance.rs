//! Attendance database model

use chrono::{DateTime, Utc};
use roster_core::IssueRecord;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the attendance table
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub id: String,
    pub name: String,
    pub submitted_by: String,
    pub members: Vec<String>,
    /// `[{member, reason}]`
    pub issues: Json<Vec<IssueRecord>>,
    pub recorded: bool,
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}
