//! Storage projection of an [`Attendance`]
//!
//! Members are flattened to bare ids; hydrating them back into [`Member`]
//! records is the member directory's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Attendance, AttendanceIssue, Member};
use crate::value_objects::{AttendanceId, ChannelId, MemberId, MessageId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    #[serde(rename = "member")]
    pub member_id: MemberId,
    pub reason: String,
}

/// Persisted roster document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    pub id: AttendanceId,
    pub name: String,
    pub submitted_by: MemberId,
    #[serde(rename = "members")]
    pub member_ids: Vec<MemberId>,
    pub issues: Vec<IssueRecord>,
    pub recorded: bool,
    pub channel_id: Option<ChannelId>,
    pub message_id: Option<MessageId>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl From<&Attendance> for AttendanceRecord {
    fn from(attendance: &Attendance) -> Self {
        Self {
            id: attendance.id.clone(),
            name: attendance.name.clone(),
            submitted_by: attendance.submitted_by.clone(),
            member_ids: attendance.members.iter().map(|m| m.id.clone()).collect(),
            issues: attendance
                .issues
                .iter()
                .map(|issue| IssueRecord {
                    member_id: issue.member.id.clone(),
                    reason: issue.reason.clone(),
                })
                .collect(),
            recorded: attendance.recorded,
            channel_id: attendance.channel_id.clone(),
            message_id: attendance.message_id.clone(),
            date_created: attendance.date_created,
            date_updated: attendance.date_updated,
        }
    }
}

impl AttendanceRecord {
    /// Rebuild the entity with members already resolved by the caller
    ///
    /// `resolve` is called once per stored id, members first then issues.
    pub fn hydrate<F>(self, mut resolve: F) -> Attendance
    where
        F: FnMut(&MemberId) -> Member,
    {
        let members = self.member_ids.iter().map(&mut resolve).collect();
        let issues = self
            .issues
            .into_iter()
            .map(|issue| AttendanceIssue {
                member: resolve(&issue.member_id),
                reason: issue.reason,
            })
            .collect();

        let mut attendance = Attendance {
            id: self.id,
            name: self.name,
            submitted_by: self.submitted_by,
            members,
            issues,
            recorded: self.recorded,
            channel_id: self.channel_id,
            message_id: self.message_id,
            date_created: self.date_created,
            date_updated: self.date_updated,
        };
        attendance.dedup();
        attendance
    }

    /// Every member id referenced by this record, members first
    pub fn referenced_ids(&self) -> impl Iterator<Item = &MemberId> {
        self.member_ids
            .iter()
            .chain(self.issues.iter().map(|issue| &issue.member_id))
    }
}
