//! In-memory ports for service and HTTP tests
//!
//! Enabled for this crate's tests and, through the `test-util` feature, for
//! downstream crates.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use roster_core::{
    ActiveEvent, ActiveEventRepository, AttendanceFilter, AttendanceId, AttendanceRecord,
    AttendanceRepository, ChannelId, ChatClient, DomainError, Member, MemberDirectory, MemberId,
    Message, MessageId, MessageSend, Rank, RepoResult,
};

use crate::services::ServiceContext;

/// Member that passes every built-in eligibility rule
pub fn eligible_member(id: &str, name: &str) -> Member {
    Member {
        rank: Rank::Member,
        rsi_member: true,
        validated: true,
        ..Member::new(id, name)
    }
}

fn injected(what: &str) -> DomainError {
    DomainError::DatabaseError(format!("injected {what} failure"))
}

// ============================================================================
// Attendance store
// ============================================================================

#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    records: Mutex<HashMap<AttendanceId, AttendanceRecord>>,
    upserts: Mutex<Vec<AttendanceRecord>>,
    failing: AtomicBool,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a database error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every record passed to `upsert`, in call order
    pub fn upserts(&self) -> Vec<AttendanceRecord> {
        self.upserts.lock().clone()
    }

    pub fn get(&self, id: &AttendanceId) -> Option<AttendanceRecord> {
        self.records.lock().get(id).cloned()
    }

    pub fn insert(&self, record: AttendanceRecord) {
        self.records.lock().insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, what: &str) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(injected(what));
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn find_by_id(&self, id: &AttendanceId) -> RepoResult<Option<AttendanceRecord>> {
        self.check("find")?;
        Ok(self.get(id))
    }

    async fn list(
        &self,
        filter: &AttendanceFilter,
        limit: usize,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        self.check("list")?;
        let mut matching: Vec<AttendanceRecord> = self
            .records
            .lock()
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then_with(|| b.id.cmp(&a.id))
        });
        if limit > 0 {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn count(&self, filter: &AttendanceFilter) -> RepoResult<u64> {
        self.check("count")?;
        let count = self
            .records
            .lock()
            .values()
            .filter(|record| filter.matches(record))
            .count();
        Ok(count as u64)
    }

    async fn upsert(&self, record: &AttendanceRecord) -> RepoResult<()> {
        self.check("upsert")?;
        self.upserts.lock().push(record.clone());
        self.insert(record.clone());
        Ok(())
    }

    async fn delete(&self, id: &AttendanceId) -> RepoResult<bool> {
        self.check("delete")?;
        Ok(self.records.lock().remove(id).is_some())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check("ping")
    }
}

// ============================================================================
// Member directory
// ============================================================================

/// Directory with optional scripted eligibility reasons per member
#[derive(Default)]
pub struct InMemoryMemberDirectory {
    members: Mutex<HashMap<MemberId, Member>>,
    scripted: Mutex<HashMap<MemberId, Vec<String>>>,
}

impl InMemoryMemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, member: Member) {
        self.members.lock().insert(member.id.clone(), member);
    }

    pub fn remove(&self, id: &MemberId) {
        self.members.lock().remove(id);
    }

    pub fn get(&self, id: &MemberId) -> Option<Member> {
        self.members.lock().get(id).cloned()
    }

    /// Override the eligibility check for one member; empty clears it
    pub fn set_issues(&self, id: &str, reasons: &[&str]) {
        let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
        self.scripted.lock().insert(MemberId::from(id), reasons);
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_by_id(&self, id: &MemberId) -> RepoResult<Option<Member>> {
        Ok(self.members.lock().get(id).cloned())
    }

    async fn list(&self, limit: usize) -> RepoResult<Vec<Member>> {
        let mut members: Vec<Member> = self.members.lock().values().cloned().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        if limit > 0 {
            members.truncate(limit);
        }
        Ok(members)
    }

    async fn upsert(&self, member: &Member) -> RepoResult<()> {
        self.insert(member.clone());
        Ok(())
    }

    async fn delete(&self, id: &MemberId) -> RepoResult<bool> {
        Ok(self.members.lock().remove(id).is_some())
    }

    fn issues(&self, member: &Member) -> Vec<String> {
        match self.scripted.lock().get(&member.id) {
            Some(reasons) => reasons.clone(),
            None => member.eligibility_issues(),
        }
    }
}

// ============================================================================
// Active event store
// ============================================================================

#[derive(Default)]
pub struct InMemoryActiveEventRepository {
    events: Mutex<HashMap<ChannelId, ActiveEvent>>,
}

impl InMemoryActiveEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel_id: &ChannelId) -> Option<ActiveEvent> {
        self.events.lock().get(channel_id).cloned()
    }
}

#[async_trait]
impl ActiveEventRepository for InMemoryActiveEventRepository {
    async fn find_by_channel(&self, channel_id: &ChannelId) -> RepoResult<Option<ActiveEvent>> {
        Ok(self.get(channel_id))
    }

    async fn upsert(&self, event: &ActiveEvent) -> RepoResult<()> {
        self.events
            .lock()
            .insert(event.channel_id.clone(), event.clone());
        Ok(())
    }

    async fn delete(&self, channel_id: &ChannelId) -> RepoResult<bool> {
        Ok(self.events.lock().remove(channel_id).is_some())
    }
}

// ============================================================================
// Chat client
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCall {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub body: MessageSend,
}

#[derive(Default)]
struct ChatState {
    channels: HashMap<ChannelId, Vec<Message>>,
    sent: Vec<(ChannelId, MessageSend)>,
    edits: Vec<EditCall>,
    deleted: Vec<(ChannelId, MessageId)>,
}

/// Chat client that keeps channels in memory and records every call
#[derive(Default)]
pub struct RecordingChatClient {
    state: Mutex<ChatState>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl RecordingChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with a chat error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seed a channel with an existing message
    pub fn push_message(&self, message: Message) {
        self.state
            .lock()
            .channels
            .entry(message.channel_id.clone())
            .or_default()
            .push(message);
    }

    pub fn sent(&self) -> Vec<(ChannelId, MessageSend)> {
        self.state.lock().sent.clone()
    }

    pub fn edits(&self) -> Vec<EditCall> {
        self.state.lock().edits.clone()
    }

    pub fn deleted(&self) -> Vec<(ChannelId, MessageId)> {
        self.state.lock().deleted.clone()
    }

    pub fn messages(&self, channel_id: &ChannelId) -> Vec<Message> {
        self.state
            .lock()
            .channels
            .get(channel_id)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self, what: &str) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::ChatError(format!("injected {what} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl ChatClient for RecordingChatClient {
    async fn send_message(
        &self,
        channel_id: &ChannelId,
        message: &MessageSend,
    ) -> RepoResult<Message> {
        self.check("send")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let sent = message
            .clone()
            .into_message(MessageId::from(format!("msg-{id}")), channel_id.clone());

        let mut state = self.state.lock();
        state.sent.push((channel_id.clone(), message.clone()));
        state
            .channels
            .entry(channel_id.clone())
            .or_default()
            .push(sent.clone());
        Ok(sent)
    }

    async fn edit_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        message: &MessageSend,
    ) -> RepoResult<Message> {
        self.check("edit")?;
        let mut state = self.state.lock();
        let stored = state
            .channels
            .get_mut(channel_id)
            .and_then(|messages| messages.iter_mut().find(|m| &m.id == message_id))
            .ok_or_else(|| DomainError::MessageNotFound(message_id.clone()))?;

        let edited = message
            .clone()
            .into_message(message_id.clone(), channel_id.clone());
        *stored = Message {
            author_id: stored.author_id.clone(),
            referenced_message: stored.referenced_message.take(),
            timestamp: stored.timestamp,
            ..edited.clone()
        };
        state.edits.push(EditCall {
            channel_id: channel_id.clone(),
            message_id: message_id.clone(),
            body: message.clone(),
        });
        Ok(edited)
    }

    async fn delete_message(&self, channel_id: &ChannelId, message_id: &MessageId) -> RepoResult<()> {
        self.check("delete")?;
        let mut state = self.state.lock();
        let messages = state
            .channels
            .get_mut(channel_id)
            .ok_or_else(|| DomainError::MessageNotFound(message_id.clone()))?;
        let pos = messages
            .iter()
            .position(|m| &m.id == message_id)
            .ok_or_else(|| DomainError::MessageNotFound(message_id.clone()))?;
        messages.remove(pos);
        state.deleted.push((channel_id.clone(), message_id.clone()));
        Ok(())
    }

    async fn fetch_message(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
    ) -> RepoResult<Option<Message>> {
        self.check("fetch")?;
        Ok(self
            .messages(channel_id)
            .into_iter()
            .find(|m| &m.id == message_id))
    }

    async fn fetch_messages(&self, channel_id: &ChannelId, limit: usize) -> RepoResult<Vec<Message>> {
        self.check("fetch")?;
        let messages = self.messages(channel_id);
        let skip = messages.len().saturating_sub(limit);
        Ok(messages.into_iter().skip(skip).collect())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Service context wired to in-memory ports, with handles to each fake
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub attendance: Arc<InMemoryAttendanceRepository>,
    pub members: Arc<InMemoryMemberDirectory>,
    pub events: Arc<InMemoryActiveEventRepository>,
    pub chat: Arc<RecordingChatClient>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_default_channel(None)
    }

    /// # Panics
    /// Never in practice; every port is provided
    pub fn with_default_channel(channel_id: Option<ChannelId>) -> Self {
        let attendance = Arc::new(InMemoryAttendanceRepository::new());
        let members = Arc::new(InMemoryMemberDirectory::new());
        let events = Arc::new(InMemoryActiveEventRepository::new());
        let chat = Arc::new(RecordingChatClient::new());

        let ctx = ServiceContext::builder()
            .attendance_repo(attendance.clone())
            .member_directory(members.clone())
            .event_repo(events.clone())
            .chat(chat.clone())
            .default_channel_id(channel_id)
            .build()
            .expect("all ports provided");

        Self {
            ctx,
            attendance,
            members,
            events,
            chat,
        }
    }

    /// Register an eligible member
    pub fn eligible(&self, id: &str, name: &str) -> Member {
        let member = eligible_member(id, name);
        self.members.insert(member.clone());
        member
    }

    /// Register a member the directory reports `reasons` for
    pub fn with_issues(&self, id: &str, name: &str, reasons: &[&str]) -> Member {
        let member = eligible_member(id, name);
        self.members.insert(member.clone());
        self.members.set_issues(id, reasons);
        member
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
