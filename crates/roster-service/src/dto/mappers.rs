//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use roster_core::{ActiveEvent, Attendance, AttendanceIssue, EventAttendee, Member, Message};

use crate::services::{EventOutcome, InteractionOutcome, MemberStatus, RosterOutcome};

use super::responses::{
    ActiveEventResponse, AttendanceResponse, EventAttendeeResponse, InteractionResponse,
    IssueResponse, MemberDetailResponse, MemberResponse, MessageResponse,
};

// ============================================================================
// Attendance Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name.clone(),
            rank: member.rank.as_str().to_string(),
        }
    }
}

impl From<&AttendanceIssue> for IssueResponse {
    fn from(issue: &AttendanceIssue) -> Self {
        Self {
            member: MemberResponse::from(&issue.member),
            reason: issue.reason.clone(),
        }
    }
}

impl From<&Attendance> for AttendanceResponse {
    fn from(attendance: &Attendance) -> Self {
        Self {
            id: attendance.id.to_string(),
            name: attendance.name.clone(),
            submitted_by: attendance.submitted_by.to_string(),
            members: attendance.members.iter().map(MemberResponse::from).collect(),
            issues: attendance.issues.iter().map(IssueResponse::from).collect(),
            recorded: attendance.recorded,
            channel_id: attendance.channel_id.as_ref().map(ToString::to_string),
            message_id: attendance.message_id.as_ref().map(ToString::to_string),
            date_created: attendance.date_created,
            date_updated: attendance.date_updated,
        }
    }
}

impl From<Attendance> for AttendanceResponse {
    fn from(attendance: Attendance) -> Self {
        Self::from(&attendance)
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<MemberStatus> for MemberDetailResponse {
    fn from(status: MemberStatus) -> Self {
        let MemberStatus { member, issues } = status;
        Self {
            id: member.id.into_inner(),
            name: member.name,
            rank: member.rank.as_str().to_string(),
            is_bot: member.is_bot,
            rsi_member: member.rsi_member,
            bad_affiliation: member.bad_affiliation,
            validated: member.validated,
            issues,
            updated_at: member.updated_at,
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&EventAttendee> for EventAttendeeResponse {
    fn from(attendee: &EventAttendee) -> Self {
        Self {
            member_id: attendee.member_id.to_string(),
            label: attendee.label.clone(),
            attended: attendee.attended,
        }
    }
}

impl From<&ActiveEvent> for ActiveEventResponse {
    fn from(event: &ActiveEvent) -> Self {
        Self {
            channel_id: event.channel_id.to_string(),
            message_id: event.message_id.as_ref().map(ToString::to_string),
            started_by: event.started_by.to_string(),
            attendees: event.attendees.iter().map(EventAttendeeResponse::from).collect(),
            started_at: event.started_at,
        }
    }
}

impl From<ActiveEvent> for ActiveEventResponse {
    fn from(event: ActiveEvent) -> Self {
        Self::from(&event)
    }
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            channel_id: message.channel_id.to_string(),
            content: message.content.clone(),
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

// ============================================================================
// Interaction Mappers
// ============================================================================

impl From<InteractionOutcome> for InteractionResponse {
    fn from(outcome: InteractionOutcome) -> Self {
        match outcome {
            InteractionOutcome::Roster(RosterOutcome::Updated(attendance)) => Self::RosterUpdated {
                attendance: attendance.into(),
            },
            InteractionOutcome::Roster(RosterOutcome::Deleted(id)) => Self::RosterDeleted {
                attendance_id: id.into_inner(),
            },
            InteractionOutcome::Event(EventOutcome::Toggled(event)) => Self::EventUpdated {
                event: event.into(),
            },
            InteractionOutcome::Event(EventOutcome::Submitted(message)) => Self::EventSubmitted {
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{AttendanceId, MemberId};

    #[test]
    fn test_attendance_response_mapping() {
        let mut attendance =
            Attendance::new(AttendanceId::from("r1"), "Mining Op", MemberId::from("u1"));
        attendance.add_member(Member::new("m1", "One"), vec!["guest".to_string()]);

        let response = AttendanceResponse::from(&attendance);
        assert_eq!(response.id, "r1");
        assert!(response.members.is_empty());
        assert_eq!(response.issues[0].member.id, "m1");
        assert_eq!(response.issues[0].member.rank, "guest");
        assert_eq!(response.issues[0].reason, "guest");
        assert!(response.channel_id.is_none());
    }

    #[test]
    fn test_deleted_outcome_mapping() {
        let outcome = InteractionOutcome::Roster(RosterOutcome::Deleted(AttendanceId::from("r9")));
        let response = InteractionResponse::from(outcome);
        assert!(matches!(
            response,
            InteractionResponse::RosterDeleted { ref attendance_id } if attendance_id == "r9"
        ));
    }
}
