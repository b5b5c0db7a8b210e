//! ActiveEvent entity <-> model mapper

use roster_core::{ActiveEvent, ChannelId, EventAttendee, MemberId, MessageId};
use sqlx::types::Json;

use crate::models::ActiveEventModel;

impl From<ActiveEventModel> for ActiveEvent {
    fn from(model: ActiveEventModel) -> Self {
        ActiveEvent {
            channel_id: ChannelId::new(model.channel_id),
            message_id: model.message_id.map(MessageId::new),
            started_by: MemberId::new(model.started_by),
            attendees: model.attendees.0,
            started_at: model.started_at,
        }
    }
}

/// Values bound by the active event upsert
pub struct ActiveEventInsert<'a> {
    pub channel_id: &'a str,
    pub message_id: Option<&'a str>,
    pub started_by: &'a str,
    pub attendees: Json<&'a [EventAttendee]>,
}

impl<'a> ActiveEventInsert<'a> {
    pub fn new(event: &'a ActiveEvent) -> Self {
        Self {
            channel_id: event.channel_id.as_str(),
            message_id: event.message_id.as_ref().map(MessageId::as_str),
            started_by: event.started_by.as_str(),
            attendees: Json(&event.attendees),
        }
    }
}
