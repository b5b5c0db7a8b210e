//! Active event database model

use chrono::{DateTime, Utc};
use roster_core::EventAttendee;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the active_events table
#[derive(Debug, Clone, FromRow)]
pub struct ActiveEventModel {
    pub channel_id: String,
    pub message_id: Option<String>,
    pub started_by: String,
    pub attendees: Json<Vec<EventAttendee>>,
    pub started_at: DateTime<Utc>,
}
