//! Active voice attendance event - a toggle board open in one channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChannelId, MemberId, MessageId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttendee {
    pub member_id: MemberId,
    /// Display label shown on the toggle button and in the summary
    pub label: String,
    pub attended: bool,
}

impl EventAttendee {
    /// Attendees start out marked as present
    pub fn new(member_id: MemberId, label: impl Into<String>) -> Self {
        Self {
            member_id,
            label: label.into(),
            attended: true,
        }
    }
}

/// Event tracked for a channel; at most one per channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub channel_id: ChannelId,
    pub message_id: Option<MessageId>,
    pub started_by: MemberId,
    pub attendees: Vec<EventAttendee>,
    pub started_at: DateTime<Utc>,
}

impl ActiveEvent {
    pub fn new(channel_id: ChannelId, started_by: MemberId, attendees: Vec<EventAttendee>) -> Self {
        Self {
            channel_id,
            message_id: None,
            started_by,
            attendees,
            started_at: Utc::now(),
        }
    }

    /// Flip one attendee; returns the new state or `None` if not on the board
    pub fn toggle(&mut self, member_id: &MemberId) -> Option<bool> {
        let attendee = self
            .attendees
            .iter_mut()
            .find(|a| &a.member_id == member_id)?;
        attendee.attended = !attendee.attended;
        Some(attendee.attended)
    }

    pub fn attended(&self) -> impl Iterator<Item = &EventAttendee> {
        self.attendees.iter().filter(|a| a.attended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> ActiveEvent {
        ActiveEvent::new(
            ChannelId::from("vc"),
            MemberId::from("u1"),
            vec![
                EventAttendee::new(MemberId::from("m1"), "Alpha"),
                EventAttendee::new(MemberId::from("m2"), "Bravo"),
            ],
        )
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut event = event();
        assert_eq!(event.toggle(&MemberId::from("m1")), Some(false));
        assert_eq!(event.toggle(&MemberId::from("m1")), Some(true));
        assert_eq!(event.toggle(&MemberId::from("zz")), None);
    }

    #[test]
    fn test_attended_filters_toggled_off() {
        let mut event = event();
        event.toggle(&MemberId::from("m2"));
        let labels: Vec<_> = event.attended().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Alpha"]);
    }
}
