//! Attendance service
//!
//! Roster lifecycle: create, membership edits, eligibility recheck, record,
//! delete, chat publishing and recovery from chat.

use std::collections::HashMap;

use roster_core::{
    Attendance, AttendanceFilter, AttendanceId, AttendanceRecord, ChannelId, DomainError, Member,
    MemberId, Message, MessageId,
};
use tracing::{debug, info, instrument, warn};

use crate::codec::{self, RosterAction, RosterComponent};

use super::context::ServiceContext;
use super::error::{OperationExt, ServiceError, ServiceResult};

/// Messages fetched from a thread when importing without an explicit limit
pub const DEFAULT_THREAD_FETCH_LIMIT: usize = 50;

/// Result of a roster button press
#[derive(Debug, Clone)]
pub enum RosterOutcome {
    /// Roster was mutated and its chat message re-rendered
    Updated(Attendance),
    /// Roster row and chat message were removed
    Deleted(AttendanceId),
}

/// Attendance service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a new roster and persist it
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, submitted_by: MemberId) -> ServiceResult<Attendance> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Roster name must not be empty"));
        }
        if submitted_by.is_empty() {
            return Err(ServiceError::validation("submitted_by must not be empty"));
        }

        let attendance = Attendance::new(self.ctx.generate_attendance_id(), name, submitted_by);
        self.persist(&attendance).await?;

        info!(attendance_id = %attendance.id, name = %attendance.name, "Attendance created");
        Ok(attendance)
    }

    /// Load a roster and resolve its members
    #[instrument(skip(self))]
    pub async fn get(&self, id: &AttendanceId) -> ServiceResult<Attendance> {
        let record = self
            .ctx
            .attendance_repo()
            .find_by_id(id)
            .await
            .during("load attendance")?
            .ok_or_else(|| DomainError::AttendanceNotFound(id.clone()))?;

        self.hydrate(record, &mut HashMap::new()).await
    }

    /// Load the roster a rendered chat message belongs to
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn get_from_message(&self, message: &Message) -> ServiceResult<Attendance> {
        let id = codec::parse_attendance_id(message)?;
        self.get(&id).await
    }

    /// Rebuild a roster from thread messages without persisting it
    ///
    /// Every mentioned member must resolve; an unknown id fails the whole
    /// reconstruction.
    #[instrument(skip(self, messages), fields(messages = messages.len()))]
    pub async fn reconstruct_from_thread(&self, messages: &[Message]) -> ServiceResult<Attendance> {
        let thread = codec::parse_thread(messages)?;
        let mut attendance = Attendance::new(
            thread.id,
            thread.name,
            thread.submitted_by.unwrap_or_default(),
        );

        for member_id in &thread.member_ids {
            let member = self.resolve_member(member_id).await?;
            let reasons = self.ctx.member_directory().issues(&member);
            attendance.add_member(member, reasons);
        }

        debug!(
            attendance_id = %attendance.id,
            members = attendance.members.len(),
            issues = attendance.issues.len(),
            "Attendance reconstructed from thread"
        );
        Ok(attendance)
    }

    /// Fetch a thread, rebuild its roster and persist it
    ///
    /// Only for rosters the store has lost; an existing row is never
    /// replaced.
    #[instrument(skip(self))]
    pub async fn import_from_thread(
        &self,
        channel_id: &ChannelId,
        limit: Option<usize>,
    ) -> ServiceResult<Attendance> {
        let limit = limit.unwrap_or(DEFAULT_THREAD_FETCH_LIMIT);
        let messages = self
            .ctx
            .chat()
            .fetch_messages(channel_id, limit)
            .await
            .during("fetch thread")?;

        let mut attendance = self.reconstruct_from_thread(&messages).await?;
        let _guard = self.ctx.roster_locks().acquire(&attendance.id).await;
        let existing = self
            .ctx
            .attendance_repo()
            .find_by_id(&attendance.id)
            .await
            .during("load attendance")?;
        if existing.is_some() {
            return Err(DomainError::AttendanceExists(attendance.id).into());
        }
        self.save(&mut attendance).await?;

        info!(attendance_id = %attendance.id, channel_id = %channel_id, "Attendance imported from thread");
        Ok(attendance)
    }

    /// Add a member, routing them to `issues` if the directory reports any
    #[instrument(skip(self))]
    pub async fn add_member(
        &self,
        id: &AttendanceId,
        member_id: &MemberId,
    ) -> ServiceResult<Attendance> {
        let _guard = self.ctx.roster_locks().acquire(id).await;
        let mut attendance = self.load_editable(id).await?;

        let member = self.resolve_member(member_id).await?;
        let reasons = self.ctx.member_directory().issues(&member);
        let has_issues = !reasons.is_empty();
        attendance.add_member(member, reasons);
        self.save(&mut attendance).await?;

        info!(attendance_id = %id, member_id = %member_id, has_issues, "Member added");
        Ok(attendance)
    }

    /// Remove a member from both sets; absent members are a no-op
    #[instrument(skip(self))]
    pub async fn remove_member(
        &self,
        id: &AttendanceId,
        member_id: &MemberId,
    ) -> ServiceResult<Attendance> {
        let _guard = self.ctx.roster_locks().acquire(id).await;
        let mut attendance = self.load_editable(id).await?;

        attendance.remove_member(member_id);
        self.save(&mut attendance).await?;

        info!(attendance_id = %id, member_id = %member_id, "Member removed");
        Ok(attendance)
    }

    /// Re-run eligibility for members with issues; cleared ones are dropped
    #[instrument(skip(self))]
    pub async fn recheck_issues(&self, id: &AttendanceId) -> ServiceResult<Attendance> {
        let _guard = self.ctx.roster_locks().acquire(id).await;
        let mut attendance = self.load_editable(id).await?;

        let directory = self.ctx.member_directory();
        let cleared = attendance.recheck_issues(|member| directory.issues(member));
        self.save(&mut attendance).await?;

        info!(
            attendance_id = %id,
            cleared = cleared.len(),
            remaining = attendance.issues.len(),
            "Issues rechecked"
        );
        Ok(attendance)
    }

    /// Lock the roster for reporting; recording twice is a no-op
    #[instrument(skip(self))]
    pub async fn record(&self, id: &AttendanceId) -> ServiceResult<Attendance> {
        let _guard = self.ctx.roster_locks().acquire(id).await;
        let mut attendance = self.get(id).await?;
        if attendance.recorded {
            debug!(attendance_id = %id, "Attendance already recorded");
            return Ok(attendance);
        }

        attendance.record();
        self.save(&mut attendance).await?;

        info!(attendance_id = %id, members = attendance.members.len(), "Attendance recorded");
        Ok(attendance)
    }

    /// Remove the store row; the chat message is left to the caller
    ///
    /// Returns the roster as it was before deletion.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &AttendanceId) -> ServiceResult<Attendance> {
        self.remove(id, false).await
    }

    /// Refresh `date_updated` and upsert the projection
    #[instrument(skip(self, attendance), fields(attendance_id = %attendance.id))]
    pub async fn save(&self, attendance: &mut Attendance) -> ServiceResult<()> {
        attendance.touch();
        self.persist(attendance).await
    }

    /// Open rosters, newest first; `limit` 0 means unbounded
    #[instrument(skip(self))]
    pub async fn list_active(&self, limit: usize) -> ServiceResult<Vec<Attendance>> {
        let records = self
            .ctx
            .attendance_repo()
            .list(&AttendanceFilter::active(), limit)
            .await
            .during("list attendance")?;

        let mut resolved = HashMap::new();
        let mut rosters = Vec::with_capacity(records.len());
        for record in records {
            rosters.push(self.hydrate(record, &mut resolved).await?);
        }
        Ok(rosters)
    }

    /// Number of recorded rosters that counted `member_id` as an attendee
    #[instrument(skip(self))]
    pub async fn member_attendance_count(&self, member_id: &MemberId) -> ServiceResult<u64> {
        self.ctx
            .attendance_repo()
            .count(&AttendanceFilter::recorded_with_member(member_id.clone()))
            .await
            .during("count attendance")
    }

    /// Render the roster into chat and remember where it went
    ///
    /// A roster that is already published is edited in place. If that
    /// message is gone, or the roster was never published, a new message is
    /// sent to `channel_id`, the previous channel, or the configured default.
    #[instrument(skip(self))]
    pub async fn publish(
        &self,
        id: &AttendanceId,
        channel_id: Option<ChannelId>,
    ) -> ServiceResult<Attendance> {
        let _guard = self.ctx.roster_locks().acquire(id).await;
        let mut attendance = self.get(id).await?;
        let body = codec::render(&attendance);

        if let (Some(current_channel), Some(message_id)) =
            (attendance.channel_id.clone(), attendance.message_id.clone())
        {
            let same_channel = channel_id.as_ref().is_none_or(|c| *c == current_channel);
            if same_channel {
                match self
                    .ctx
                    .chat()
                    .edit_message(&current_channel, &message_id, &body)
                    .await
                {
                    Ok(_) => {
                        debug!(attendance_id = %id, message_id = %message_id, "Attendance message edited");
                        return Ok(attendance);
                    }
                    Err(DomainError::MessageNotFound(_)) => {
                        warn!(attendance_id = %id, message_id = %message_id, "Attendance message gone, sending a new one");
                    }
                    Err(e) => return Err(ServiceError::from(e).with_operation("edit attendance message")),
                }
            }
        }

        let target = channel_id
            .or_else(|| attendance.channel_id.clone())
            .or_else(|| self.ctx.default_channel_id().cloned())
            .ok_or_else(|| ServiceError::validation("No channel to publish the roster to"))?;

        let message = self
            .ctx
            .chat()
            .send_message(&target, &body)
            .await
            .during("send attendance message")?;
        let previous = attendance.channel_id.clone().zip(attendance.message_id.clone());
        attendance.set_message(target, message.id);
        self.save(&mut attendance).await?;

        // The old message's buttons would still act on this roster
        if let Some((channel_id, message_id)) = previous {
            if let Err(e) = self.delete_message(&channel_id, &message_id).await {
                warn!(attendance_id = %id, message_id = %message_id, error = %e, "Failed to delete previous attendance message");
            }
        }

        info!(
            attendance_id = %id,
            channel_id = ?attendance.channel_id,
            message_id = ?attendance.message_id,
            "Attendance published"
        );
        Ok(attendance)
    }

    /// Apply a roster button press and update its chat message
    #[instrument(skip(self), fields(custom_id = %component.custom_id()))]
    pub async fn handle_component(&self, component: &RosterComponent) -> ServiceResult<RosterOutcome> {
        let id = &component.attendance_id;
        match component.action {
            RosterAction::Record => {
                let attendance = self.record(id).await?;
                self.refresh_message(&attendance).await?;
                Ok(RosterOutcome::Updated(attendance))
            }
            RosterAction::Recheck => {
                let attendance = self.recheck_issues(id).await?;
                self.refresh_message(&attendance).await?;
                Ok(RosterOutcome::Updated(attendance))
            }
            RosterAction::Delete => {
                let attendance = self.remove(id, true).await?;
                if let (Some(channel_id), Some(message_id)) =
                    (&attendance.channel_id, &attendance.message_id)
                {
                    self.delete_message(channel_id, message_id).await?;
                }
                Ok(RosterOutcome::Deleted(attendance.id))
            }
        }
    }

    /// Parse a raw custom id and apply it
    pub async fn handle_custom_id(&self, custom_id: &str) -> ServiceResult<RosterOutcome> {
        let component: RosterComponent = custom_id.parse()?;
        self.handle_component(&component).await
    }

    // === Internals ===

    async fn persist(&self, attendance: &Attendance) -> ServiceResult<()> {
        self.ctx
            .attendance_repo()
            .upsert(&AttendanceRecord::from(attendance))
            .await
            .during("save attendance")
    }

    /// Delete the row under the roster lock; `editable_only` refuses
    /// recorded rosters
    async fn remove(&self, id: &AttendanceId, editable_only: bool) -> ServiceResult<Attendance> {
        let _guard = self.ctx.roster_locks().acquire(id).await;
        let attendance = if editable_only {
            self.load_editable(id).await?
        } else {
            self.get(id).await?
        };

        let deleted = self
            .ctx
            .attendance_repo()
            .delete(id)
            .await
            .during("delete attendance")?;
        if !deleted {
            return Err(DomainError::AttendanceNotFound(id.clone()).into());
        }

        info!(attendance_id = %id, "Attendance deleted");
        Ok(attendance)
    }

    async fn load_editable(&self, id: &AttendanceId) -> ServiceResult<Attendance> {
        let attendance = self.get(id).await?;
        if attendance.recorded {
            return Err(DomainError::AlreadyRecorded(id.clone()).into());
        }
        Ok(attendance)
    }

    async fn resolve_member(&self, member_id: &MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_directory()
            .find_by_id(member_id)
            .await
            .during("resolve member")?
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()).into())
    }

    /// Resolve every referenced id once; unknown ids become placeholders
    async fn hydrate(
        &self,
        record: AttendanceRecord,
        resolved: &mut HashMap<MemberId, Member>,
    ) -> ServiceResult<Attendance> {
        for member_id in record.referenced_ids() {
            if resolved.contains_key(member_id) {
                continue;
            }
            let member = self
                .ctx
                .member_directory()
                .find_by_id(member_id)
                .await
                .during("resolve member")?
                .unwrap_or_else(|| {
                    debug!(member_id = %member_id, "Member not in directory, keeping placeholder");
                    Member::unresolved(member_id.clone())
                });
            resolved.insert(member_id.clone(), member);
        }

        Ok(record.hydrate(|member_id| {
            resolved
                .get(member_id)
                .cloned()
                .unwrap_or_else(|| Member::unresolved(member_id.clone()))
        }))
    }

    async fn refresh_message(&self, attendance: &Attendance) -> ServiceResult<()> {
        let (Some(channel_id), Some(message_id)) = (&attendance.channel_id, &attendance.message_id)
        else {
            return Ok(());
        };

        match self
            .ctx
            .chat()
            .edit_message(channel_id, message_id, &codec::render(attendance))
            .await
        {
            Ok(_) => Ok(()),
            Err(DomainError::MessageNotFound(_)) => {
                warn!(attendance_id = %attendance.id, message_id = %message_id, "Attendance message gone, not re-rendered");
                Ok(())
            }
            Err(e) => Err(ServiceError::from(e).with_operation("edit attendance message")),
        }
    }

    async fn delete_message(&self, channel_id: &ChannelId, message_id: &MessageId) -> ServiceResult<()> {
        match self.ctx.chat().delete_message(channel_id, message_id).await {
            Ok(()) | Err(DomainError::MessageNotFound(_)) => Ok(()),
            Err(e) => Err(ServiceError::from(e).with_operation("delete attendance message")),
        }
    }
}
