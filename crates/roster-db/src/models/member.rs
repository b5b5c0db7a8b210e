//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub is_bot: bool,
    pub rsi_member: bool,
    pub bad_affiliation: bool,
    pub validated: bool,
    pub updated_at: DateTime<Utc>,
}
