//! Member service
//!
//! Maintains the member directory that rosters resolve attendees through.

use chrono::Utc;
use roster_core::{DomainError, Member, MemberId, Rank};
use tracing::{info, instrument};

use crate::dto::UpsertMemberRequest;

use super::context::ServiceContext;
use super::error::{OperationExt, ServiceError, ServiceResult};

/// Directory member with its current eligibility verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStatus {
    pub member: Member,
    /// Empty when the member can be counted as an attendee
    pub issues: Vec<String>,
}

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Members by name; `limit` 0 means unbounded
    #[instrument(skip(self))]
    pub async fn list(&self, limit: usize) -> ServiceResult<Vec<MemberStatus>> {
        let members = self
            .ctx
            .member_directory()
            .list(limit)
            .await
            .during("list members")?;

        Ok(members.into_iter().map(|m| self.status(m)).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, member_id: &MemberId) -> ServiceResult<MemberStatus> {
        let member = self.load(member_id).await?;
        Ok(self.status(member))
    }

    /// Insert or replace a member's directory record
    #[instrument(skip(self, request))]
    pub async fn upsert(
        &self,
        member_id: MemberId,
        request: UpsertMemberRequest,
    ) -> ServiceResult<MemberStatus> {
        if member_id.is_empty() {
            return Err(ServiceError::validation("member_id must not be empty"));
        }
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Member name must not be empty"));
        }
        let rank = match request.rank.as_deref() {
            Some(rank) => parse_rank(rank)?,
            None => Rank::default(),
        };

        let member = Member {
            rank,
            is_bot: request.is_bot,
            rsi_member: request.rsi_member,
            bad_affiliation: request.bad_affiliation,
            validated: request.validated,
            ..Member::new(member_id, name)
        };
        self.save(&member).await?;

        info!(member_id = %member.id, rank = %member.rank, "Member saved");
        Ok(self.status(member))
    }

    /// Change an existing member's rank
    #[instrument(skip(self))]
    pub async fn set_rank(&self, member_id: &MemberId, rank: &str) -> ServiceResult<MemberStatus> {
        let rank = parse_rank(rank)?;
        let mut member = self.load(member_id).await?;

        if member.rank != rank {
            member.rank = rank;
            member.updated_at = Utc::now();
            self.save(&member).await?;
            info!(member_id = %member_id, rank = %rank, "Member rank changed");
        }

        Ok(self.status(member))
    }

    /// Remove a member; rosters that reference them keep a placeholder
    #[instrument(skip(self))]
    pub async fn delete(&self, member_id: &MemberId) -> ServiceResult<()> {
        let deleted = self
            .ctx
            .member_directory()
            .delete(member_id)
            .await
            .during("delete member")?;
        if !deleted {
            return Err(DomainError::MemberNotFound(member_id.clone()).into());
        }

        info!(member_id = %member_id, "Member deleted");
        Ok(())
    }

    // === Internals ===

    async fn load(&self, member_id: &MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_directory()
            .find_by_id(member_id)
            .await
            .during("load member")?
            .ok_or_else(|| DomainError::MemberNotFound(member_id.clone()).into())
    }

    async fn save(&self, member: &Member) -> ServiceResult<()> {
        self.ctx
            .member_directory()
            .upsert(member)
            .await
            .during("save member")
    }

    fn status(&self, member: Member) -> MemberStatus {
        let issues = self.ctx.member_directory().issues(&member);
        MemberStatus { member, issues }
    }
}

fn parse_rank(rank: &str) -> ServiceResult<Rank> {
    rank.trim().parse().map_err(ServiceError::validation)
}
