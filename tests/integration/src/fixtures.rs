//! Request bodies and response shapes used across the API tests

use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper around every success body
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreateAttendance {
    pub name: String,
    pub submitted_by: String,
}

impl CreateAttendance {
    pub fn new(name: &str, submitted_by: &str) -> Self {
        Self {
            name: name.to_string(),
            submitted_by: submitted_by.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberBody {
    pub id: String,
    pub name: String,
    pub rank: String,
}

#[derive(Debug, Deserialize)]
pub struct IssueBody {
    pub member: MemberBody,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceBody {
    pub id: String,
    pub name: String,
    pub submitted_by: String,
    pub members: Vec<MemberBody>,
    pub issues: Vec<IssueBody>,
    pub recorded: bool,
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
}

impl AttendanceBody {
    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.id.as_str()).collect()
    }

    pub fn issue_ids(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.member.id.as_str()).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct CountBody {
    pub member_id: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct UpsertMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    pub rsi_member: bool,
    pub validated: bool,
}

impl UpsertMember {
    /// Verified RSI member with the given rank
    pub fn verified(name: &str, rank: &str) -> Self {
        Self {
            name: name.to_string(),
            rank: Some(rank.to_string()),
            rsi_member: true,
            validated: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberDetailBody {
    pub id: String,
    pub name: String,
    pub rank: String,
    pub issues: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StartEvent {
    pub started_by: String,
    pub participants: Vec<String>,
}

impl StartEvent {
    pub fn new(started_by: &str, participants: &[&str]) -> Self {
        Self {
            started_by: started_by.to_string(),
            participants: participants.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AttendeeBody {
    pub member_id: String,
    pub label: String,
    pub attended: bool,
}

#[derive(Debug, Deserialize)]
pub struct EventBody {
    pub channel_id: String,
    pub message_id: Option<String>,
    pub started_by: String,
    pub attendees: Vec<AttendeeBody>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub id: String,
    pub channel_id: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct Interaction {
    pub channel_id: String,
    pub custom_id: String,
}

impl Interaction {
    pub fn new(channel_id: &str, custom_id: &str) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            custom_id: custom_id.to_string(),
        }
    }
}

/// Body of `POST /interactions`, tagged by `type`
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionBody {
    RosterUpdated { attendance: AttendanceBody },
    RosterDeleted { attendance_id: String },
    EventUpdated { event: EventBody },
    EventSubmitted { message: MessageBody },
}
