//! Button interaction router
//!
//! Every button this service renders carries a custom id; this parses it and
//! hands the press to the roster or event workflow.

use roster_core::ChannelId;
use tracing::{debug, instrument};

use crate::codec::Component;

use super::attendance::{AttendanceService, RosterOutcome};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::event::{EventOutcome, EventService};

#[derive(Debug, Clone)]
pub enum InteractionOutcome {
    Roster(RosterOutcome),
    Event(EventOutcome),
}

pub struct InteractionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InteractionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Route a button press from `channel_id`
    ///
    /// Unknown custom ids are a parse failure.
    #[instrument(skip(self))]
    pub async fn handle(
        &self,
        channel_id: &ChannelId,
        custom_id: &str,
    ) -> ServiceResult<InteractionOutcome> {
        let component: Component = custom_id.parse()?;
        debug!(?component, "Routing interaction");

        match component {
            Component::Roster(roster) => AttendanceService::new(self.ctx)
                .handle_component(&roster)
                .await
                .map(InteractionOutcome::Roster),
            Component::Event(event) => EventService::new(self.ctx)
                .handle_component(channel_id, &event)
                .await
                .map(InteractionOutcome::Event),
        }
    }
}
