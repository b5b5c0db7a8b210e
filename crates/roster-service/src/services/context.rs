//! Service context - dependency container for services
//!
//! Holds the ports (store, directory, event store, chat client), the id
//! generator and the in-process locks.

use std::sync::Arc;

use roster_core::traits::{ActiveEventRepository, AttendanceRepository, ChatClient, MemberDirectory};
use roster_core::{AttendanceId, ChannelId, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};
use super::locks::{EventLocks, RosterLocks};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Ports
    attendance_repo: Arc<dyn AttendanceRepository>,
    member_directory: Arc<dyn MemberDirectory>,
    event_repo: Arc<dyn ActiveEventRepository>,
    chat: Arc<dyn ChatClient>,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
    roster_locks: Arc<RosterLocks>,
    event_locks: Arc<EventLocks>,

    /// Channel rosters are published to when none is given
    default_channel_id: Option<ChannelId>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Ports ===

    /// Get the roster store
    pub fn attendance_repo(&self) -> &dyn AttendanceRepository {
        self.attendance_repo.as_ref()
    }

    /// Get the member directory
    pub fn member_directory(&self) -> &dyn MemberDirectory {
        self.member_directory.as_ref()
    }

    /// Get the active event store
    pub fn event_repo(&self) -> &dyn ActiveEventRepository {
        self.event_repo.as_ref()
    }

    /// Get the chat client
    pub fn chat(&self) -> &dyn ChatClient {
        self.chat.as_ref()
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new roster id
    pub fn generate_attendance_id(&self) -> AttendanceId {
        self.snowflake_generator.next_attendance_id()
    }

    pub fn roster_locks(&self) -> &RosterLocks {
        &self.roster_locks
    }

    pub fn event_locks(&self) -> &EventLocks {
        &self.event_locks
    }

    pub fn default_channel_id(&self) -> Option<&ChannelId> {
        self.default_channel_id.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("ports", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("default_channel_id", &self.default_channel_id)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    attendance_repo: Option<Arc<dyn AttendanceRepository>>,
    member_directory: Option<Arc<dyn MemberDirectory>>,
    event_repo: Option<Arc<dyn ActiveEventRepository>>,
    chat: Option<Arc<dyn ChatClient>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    default_channel_id: Option<ChannelId>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attendance_repo(mut self, repo: Arc<dyn AttendanceRepository>) -> Self {
        self.attendance_repo = Some(repo);
        self
    }

    pub fn member_directory(mut self, directory: Arc<dyn MemberDirectory>) -> Self {
        self.member_directory = Some(directory);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn ActiveEventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn chat(mut self, chat: Arc<dyn ChatClient>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn default_channel_id(mut self, channel_id: Option<ChannelId>) -> Self {
        self.default_channel_id = channel_id;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Configuration` if a port is missing. The
    /// generator defaults to worker 0.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |what: &str| ServiceError::configuration(format!("{what} is required"));

        Ok(ServiceContext {
            attendance_repo: self.attendance_repo.ok_or_else(|| missing("attendance store"))?,
            member_directory: self.member_directory.ok_or_else(|| missing("member directory"))?,
            event_repo: self.event_repo.ok_or_else(|| missing("active event store"))?,
            chat: self.chat.ok_or_else(|| missing("chat client"))?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(0))),
            roster_locks: Arc::new(RosterLocks::new()),
            event_locks: Arc::new(EventLocks::new()),
            default_channel_id: self.default_channel_id,
        })
    }
}
