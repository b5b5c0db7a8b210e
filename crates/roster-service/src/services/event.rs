//! Voice attendance event service
//!
//! One toggle board per channel, persisted through the active event store
//! so a restart does not lose the board.

use chrono::Utc;
use roster_core::{ActiveEvent, ChannelId, DomainError, EventAttendee, MemberId, Message};
use tracing::{info, instrument, warn};

use crate::codec::{self, format::EVENT_MAX_PARTICIPANTS, EventComponent};

use super::context::ServiceContext;
use super::error::{OperationExt, ServiceError, ServiceResult};

/// Result of an event board button press
#[derive(Debug, Clone)]
pub enum EventOutcome {
    Toggled(ActiveEvent),
    Submitted(Message),
}

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a toggle board for `participants` into `channel_id`
    ///
    /// Everyone starts out marked present. Labels come from the member
    /// directory, falling back to the raw id.
    #[instrument(skip(self, participants), fields(participants = participants.len()))]
    pub async fn start(
        &self,
        channel_id: &ChannelId,
        started_by: MemberId,
        participants: &[MemberId],
    ) -> ServiceResult<ActiveEvent> {
        let _guard = self.ctx.event_locks().acquire(channel_id).await;

        if self
            .ctx
            .event_repo()
            .find_by_channel(channel_id)
            .await
            .during("load event")?
            .is_some()
        {
            return Err(DomainError::EventAlreadyActive.into());
        }

        let mut unique: Vec<&MemberId> = Vec::with_capacity(participants.len());
        for id in participants.iter().filter(|id| !id.is_empty()) {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return Err(DomainError::NoParticipants.into());
        }
        if unique.len() > EVENT_MAX_PARTICIPANTS {
            return Err(DomainError::TooManyParticipants {
                max: EVENT_MAX_PARTICIPANTS,
            }
            .into());
        }

        let mut attendees = Vec::with_capacity(unique.len());
        for id in unique {
            let label = self
                .ctx
                .member_directory()
                .find_by_id(id)
                .await
                .during("resolve member")?
                .map_or_else(|| id.to_string(), |member| member.name);
            attendees.push(EventAttendee::new(id.clone(), label));
        }

        let mut event = ActiveEvent::new(channel_id.clone(), started_by, attendees);
        let board = self
            .ctx
            .chat()
            .send_message(channel_id, &codec::render_board(&event))
            .await
            .during("send event board")?;
        event.message_id = Some(board.id);

        self.ctx
            .event_repo()
            .upsert(&event)
            .await
            .during("save event")?;

        info!(channel_id = %channel_id, attendees = event.attendees.len(), "Event started");
        Ok(event)
    }

    /// Load the event tracked in `channel_id`
    #[instrument(skip(self))]
    pub async fn get(&self, channel_id: &ChannelId) -> ServiceResult<ActiveEvent> {
        self.ctx
            .event_repo()
            .find_by_channel(channel_id)
            .await
            .during("load event")?
            .ok_or_else(|| DomainError::ActiveEventNotFound(channel_id.clone()).into())
    }

    /// Flip one attendee and re-render the board
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        channel_id: &ChannelId,
        member_id: &MemberId,
    ) -> ServiceResult<ActiveEvent> {
        let _guard = self.ctx.event_locks().acquire(channel_id).await;
        let mut event = self.get(channel_id).await?;

        let attended = event
            .toggle(member_id)
            .ok_or_else(|| ServiceError::not_found("Attendee", member_id.to_string()))?;

        if let Some(message_id) = &event.message_id {
            self.ctx
                .chat()
                .edit_message(channel_id, message_id, &codec::render_board(&event))
                .await
                .during("edit event board")?;
        }
        self.ctx
            .event_repo()
            .upsert(&event)
            .await
            .during("save event")?;

        info!(channel_id = %channel_id, member_id = %member_id, attended, "Attendee toggled");
        Ok(event)
    }

    /// Post the dated summary, remove the board and stop tracking
    ///
    /// Failing to delete the board message is logged and ignored.
    #[instrument(skip(self))]
    pub async fn submit(&self, channel_id: &ChannelId) -> ServiceResult<Message> {
        let _guard = self.ctx.event_locks().acquire(channel_id).await;
        let event = self.get(channel_id).await?;

        let summary = self
            .ctx
            .chat()
            .send_message(channel_id, &codec::render_summary(&event, Utc::now()))
            .await
            .during("send event summary")?;

        if let Some(message_id) = &event.message_id {
            if let Err(e) = self.ctx.chat().delete_message(channel_id, message_id).await {
                warn!(channel_id = %channel_id, message_id = %message_id, error = %e, "Failed to delete event board");
            }
        }

        self.ctx
            .event_repo()
            .delete(channel_id)
            .await
            .during("delete event")?;

        info!(
            channel_id = %channel_id,
            attended = event.attended().count(),
            "Event submitted"
        );
        Ok(summary)
    }

    /// Apply an event board button press from `channel_id`
    pub async fn handle_component(
        &self,
        channel_id: &ChannelId,
        component: &EventComponent,
    ) -> ServiceResult<EventOutcome> {
        match component {
            EventComponent::Toggle(member_id) => {
                self.toggle(channel_id, member_id).await.map(EventOutcome::Toggled)
            }
            EventComponent::Submit => self.submit(channel_id).await.map(EventOutcome::Submitted),
        }
    }
}
