//! Member entity <-> model mapper

use roster_core::{Member, MemberId};

use crate::models::MemberModel;

impl From<MemberModel> for Member {
    fn from(model: MemberModel) -> Self {
        Member {
            id: MemberId::new(model.id),
            name: model.name,
            // Unknown ranks fall back to the least privileged one
            rank: model.rank.parse().unwrap_or_default(),
            is_bot: model.is_bot,
            rsi_member: model.rsi_member,
            bad_affiliation: model.bad_affiliation,
            validated: model.validated,
            updated_at: model.updated_at,
        }
    }
}

/// Values bound by the member upsert
pub struct MemberInsert<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub rank: &'static str,
    pub is_bot: bool,
    pub rsi_member: bool,
    pub bad_affiliation: bool,
    pub validated: bool,
}

impl<'a> MemberInsert<'a> {
    pub fn new(member: &'a Member) -> Self {
        Self {
            id: member.id.as_str(),
            name: &member.name,
            rank: member.rank.as_str(),
            is_bot: member.is_bot,
            rsi_member: member.rsi_member,
            bad_affiliation: member.bad_affiliation,
            validated: member.validated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roster_core::Rank;

    fn model(rank: &str) -> MemberModel {
        MemberModel {
            id: "m1".to_string(),
            name: "Alpha".to_string(),
            rank: rank.to_string(),
            is_bot: false,
            rsi_member: true,
            bad_affiliation: false,
            validated: true,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_member() {
        let member = Member::from(model("officer"));
        assert_eq!(member.id, MemberId::from("m1"));
        assert_eq!(member.rank, Rank::Officer);
        assert!(member.is_eligible());
    }

    #[test]
    fn test_unknown_rank_is_guest() {
        assert_eq!(Member::from(model("admiral")).rank, Rank::Guest);
    }

    #[test]
    fn test_insert_uses_rank_text() {
        let member = Member::from(model("recruit"));
        assert_eq!(MemberInsert::new(&member).rank, "recruit");
    }
}
