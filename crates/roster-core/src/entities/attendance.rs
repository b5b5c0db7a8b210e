//! Attendance entity - the roster aggregate
//!
//! A roster is a named set of members present at an activity. Members that
//! fail the eligibility check are parked in `issues` with the reasons
//! instead of being counted. A member id appears at most once across
//! `members` and `issues`; every mutation ends with [`Attendance::dedup`].

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::entities::Member;
use crate::value_objects::{AttendanceId, ChannelId, MemberId, MessageId};

/// A member that could not be counted, with the joined reasons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceIssue {
    pub member: Member,
    pub reason: String,
}

impl AttendanceIssue {
    pub fn new(member: Member, reasons: &[String]) -> Self {
        Self {
            member,
            reason: reasons.join(", "),
        }
    }
}

/// Attendance roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub id: AttendanceId,
    pub name: String,
    pub submitted_by: MemberId,
    pub members: Vec<Member>,
    pub issues: Vec<AttendanceIssue>,
    /// Locked for reporting; the interactive controls are disabled once set
    pub recorded: bool,
    pub channel_id: Option<ChannelId>,
    pub message_id: Option<MessageId>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl Attendance {
    /// Open a new, empty roster
    pub fn new(id: AttendanceId, name: impl Into<String>, submitted_by: MemberId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            submitted_by,
            members: Vec::new(),
            issues: Vec::new(),
            recorded: false,
            channel_id: None,
            message_id: None,
            date_created: now,
            date_updated: now,
        }
    }

    /// Add a member given the reasons the eligibility check produced
    ///
    /// Any reason routes the member to `issues` (replacing an older issue
    /// entry and dropping them from `members`); no reasons routes them to
    /// `members` and clears any issue entry.
    pub fn add_member(&mut self, member: Member, reasons: Vec<String>) {
        if reasons.is_empty() {
            self.issues.retain(|issue| issue.member.id != member.id);
            self.members.push(member);
        } else {
            self.members.retain(|m| m.id != member.id);
            self.issues.push(AttendanceIssue::new(member, &reasons));
        }
        self.dedup();
    }

    /// Remove the first entry for `member_id` from both sets
    ///
    /// Removing an absent member is a no-op.
    pub fn remove_member(&mut self, member_id: &MemberId) {
        if let Some(pos) = self.members.iter().position(|m| &m.id == member_id) {
            self.members.remove(pos);
        }
        if let Some(pos) = self.issues.iter().position(|i| &i.member.id == member_id) {
            self.issues.remove(pos);
        }
        self.dedup();
    }

    /// Re-run the eligibility check for the members in `issues` only
    ///
    /// Entries that come back clean are dropped, not promoted: counting
    /// them again takes an explicit add. Returns the ids that were cleared.
    pub fn recheck_issues<F>(&mut self, mut check: F) -> Vec<MemberId>
    where
        F: FnMut(&Member) -> Vec<String>,
    {
        let mut cleared = Vec::new();
        let issues = std::mem::take(&mut self.issues);
        for issue in issues {
            let reasons = check(&issue.member);
            if reasons.is_empty() {
                cleared.push(issue.member.id);
            } else {
                self.issues.push(AttendanceIssue::new(issue.member, &reasons));
            }
        }
        self.dedup();
        cleared
    }

    /// Lock the roster for reporting
    pub fn record(&mut self) {
        self.recorded = true;
    }

    /// Refresh the last-updated timestamp
    pub fn touch(&mut self) {
        self.date_updated = Utc::now();
    }

    /// Remember where the roster is rendered in chat
    pub fn set_message(&mut self, channel_id: ChannelId, message_id: MessageId) {
        self.channel_id = Some(channel_id);
        self.message_id = Some(message_id);
    }

    /// Whether the roster has been rendered into chat at least once
    #[inline]
    pub fn is_published(&self) -> bool {
        self.channel_id.is_some() && self.message_id.is_some()
    }

    pub fn issue_for(&self, member_id: &MemberId) -> Option<&AttendanceIssue> {
        self.issues.iter().find(|i| &i.member.id == member_id)
    }

    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Rebuild both sets keyed by member id
    ///
    /// Later duplicates overwrite earlier ones in place, so the first
    /// position of each id is kept. An id present in `members` is removed
    /// from `issues`.
    pub fn dedup(&mut self) {
        self.members = dedup_by_id(std::mem::take(&mut self.members), |m| &m.id);
        self.issues = dedup_by_id(std::mem::take(&mut self.issues), |i| &i.member.id);

        let accepted: HashSet<&MemberId> = self.members.iter().map(|m| &m.id).collect();
        self.issues.retain(|i| !accepted.contains(&i.member.id));
    }
}

fn dedup_by_id<T>(items: Vec<T>, key: impl Fn(&T) -> &MemberId) -> Vec<T> {
    let mut positions: HashMap<MemberId, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<T> = Vec::with_capacity(items.len());

    for item in items {
        if let Some(&pos) = positions.get(key(&item)) {
            unique[pos] = item;
            continue;
        }
        positions.insert(key(&item).clone(), unique.len());
        unique.push(item);
    }

    unique
}
