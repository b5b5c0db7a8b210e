//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{ActiveEvent, AttendanceRecord, Member};
use crate::error::DomainError;
use crate::value_objects::{AttendanceId, ChannelId, MemberId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Attendance Repository
// ============================================================================

/// Filter for listing and counting rosters; `None` fields match anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub recorded: Option<bool>,
    /// Roster's `members` contains this id (issues are not considered)
    pub member_id: Option<MemberId>,
}

impl AttendanceFilter {
    /// Rosters still open for editing
    pub fn active() -> Self {
        Self {
            recorded: Some(false),
            member_id: None,
        }
    }

    /// Recorded rosters that counted `member_id` as an attendee
    pub fn recorded_with_member(member_id: MemberId) -> Self {
        Self {
            recorded: Some(true),
            member_id: Some(member_id),
        }
    }

    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.recorded.is_none_or(|recorded| record.recorded == recorded)
            && self
                .member_id
                .as_ref()
                .is_none_or(|id| record.member_ids.contains(id))
    }
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Find roster by ID
    async fn find_by_id(&self, id: &AttendanceId) -> RepoResult<Option<AttendanceRecord>>;

    /// List rosters matching `filter`, newest first; `limit` 0 means unbounded
    async fn list(&self, filter: &AttendanceFilter, limit: usize)
        -> RepoResult<Vec<AttendanceRecord>>;

    /// Count rosters matching `filter`
    async fn count(&self, filter: &AttendanceFilter) -> RepoResult<u64>;

    /// Insert or replace the roster with the record's id
    async fn upsert(&self, record: &AttendanceRecord) -> RepoResult<()>;

    /// Delete a roster; returns false if there was nothing to delete
    async fn delete(&self, id: &AttendanceId) -> RepoResult<bool>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Member Directory
// ============================================================================

#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Resolve a member by ID
    async fn find_by_id(&self, id: &MemberId) -> RepoResult<Option<Member>>;

    /// List members by name, then id; `limit` 0 means unbounded
    async fn list(&self, limit: usize) -> RepoResult<Vec<Member>>;

    /// Insert or replace a member
    async fn upsert(&self, member: &Member) -> RepoResult<()>;

    /// Delete a member; returns false if there was nothing to delete
    async fn delete(&self, id: &MemberId) -> RepoResult<bool>;

    /// Eligibility predicate; empty means the member can be counted
    fn issues(&self, member: &Member) -> Vec<String> {
        member.eligibility_issues()
    }
}

// ============================================================================
// Active Event Repository
// ============================================================================

#[async_trait]
pub trait ActiveEventRepository: Send + Sync {
    /// Find the event tracked in a channel
    async fn find_by_channel(&self, channel_id: &ChannelId) -> RepoResult<Option<ActiveEvent>>;

    /// Insert or replace the channel's event
    async fn upsert(&self, event: &ActiveEvent) -> RepoResult<()>;

    /// Delete the channel's event; returns false if none was tracked
    async fn delete(&self, channel_id: &ChannelId) -> RepoResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Attendance;

    fn record(recorded: bool, members: &[&str]) -> AttendanceRecord {
        let mut attendance =
            Attendance::new(AttendanceId::from("r1"), "Op", MemberId::from("u1"));
        for id in members {
            attendance.members.push(Member::new(*id, *id));
        }
        attendance.recorded = recorded;
        AttendanceRecord::from(&attendance)
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = AttendanceFilter::default();
        assert!(filter.matches(&record(false, &[])));
        assert!(filter.matches(&record(true, &["m1"])));
    }

    #[test]
    fn test_active_filter() {
        let filter = AttendanceFilter::active();
        assert!(filter.matches(&record(false, &["m1"])));
        assert!(!filter.matches(&record(true, &["m1"])));
    }

    #[test]
    fn test_recorded_with_member_filter() {
        let filter = AttendanceFilter::recorded_with_member(MemberId::from("m1"));
        assert!(filter.matches(&record(true, &["m2", "m1"])));
        assert!(!filter.matches(&record(true, &["m2"])));
        assert!(!filter.matches(&record(false, &["m1"])));
    }
}
