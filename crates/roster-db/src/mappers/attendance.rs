//! AttendanceRecord <-> AttendanceModel mapper

use roster_core::{AttendanceId, AttendanceRecord, ChannelId, IssueRecord, MemberId, MessageId};
use sqlx::types::Json;

use crate::models::AttendanceModel;

impl From<AttendanceModel> for AttendanceRecord {
    fn from(model: AttendanceModel) -> Self {
        AttendanceRecord {
            id: AttendanceId::new(model.id),
            name: model.name,
            submitted_by: MemberId::new(model.submitted_by),
            member_ids: model.members.into_iter().map(MemberId::new).collect(),
            issues: model.issues.0,
            recorded: model.recorded,
            channel_id: model.channel_id.map(ChannelId::new),
            message_id: model.message_id.map(MessageId::new),
            date_created: model.date_created,
            date_updated: model.date_updated,
        }
    }
}

/// Values bound by the attendance upsert
pub struct AttendanceInsert<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub submitted_by: &'a str,
    pub members: Vec<&'a str>,
    pub issues: Json<&'a [IssueRecord]>,
    pub recorded: bool,
    pub channel_id: Option<&'a str>,
    pub message_id: Option<&'a str>,
}

impl<'a> AttendanceInsert<'a> {
    pub fn new(record: &'a AttendanceRecord) -> Self {
        Self {
            id: record.id.as_str(),
            name: &record.name,
            submitted_by: record.submitted_by.as_str(),
            members: record.member_ids.iter().map(MemberId::as_str).collect(),
            issues: Json(&record.issues),
            recorded: record.recorded,
            channel_id: record.channel_id.as_ref().map(ChannelId::as_str),
            message_id: record.message_id.as_ref().map(MessageId::as_str),
        }
    }
}
