//! Member entity - a community member as known to the member directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::MemberId;

/// Community rank, lowest privileges last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Officer,
    Member,
    Recruit,
    #[default]
    Guest,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Officer => "officer",
            Self::Member => "member",
            Self::Recruit => "recruit",
            Self::Guest => "guest",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "officer" => Ok(Self::Officer),
            "member" => Ok(Self::Member),
            "recruit" => Ok(Self::Recruit),
            "guest" => Ok(Self::Guest),
            other => Err(format!("unknown rank: {other}")),
        }
    }
}

/// Member record resolved through the member directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub rank: Rank,
    pub is_bot: bool,
    /// Belongs to the community's RSI organization
    pub rsi_member: bool,
    /// Affiliated with an organization on the enemies list
    pub bad_affiliation: bool,
    /// RSI handle has been verified
    pub validated: bool,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// New member with the default (guest) rank and nothing verified
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rank: Rank::Guest,
            is_bot: false,
            rsi_member: false,
            bad_affiliation: false,
            validated: false,
            updated_at: Utc::now(),
        }
    }

    /// Placeholder for an id the directory can no longer resolve
    ///
    /// Keeps stored rosters intact when a member has left the community.
    pub fn unresolved(id: MemberId) -> Self {
        let name = id.to_string();
        Self::new(id, name)
    }

    /// Mention token used in chat renderings
    pub fn mention(&self) -> String {
        self.id.mention()
    }

    /// Built-in eligibility rules, in reporting order
    ///
    /// An empty list means the member may be counted as an attendee.
    pub fn eligibility_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.is_bot {
            issues.push("bot".to_string());
        }
        if self.rank == Rank::Guest {
            issues.push("guest".to_string());
        }
        if !self.rsi_member {
            issues.push("not an RSI member".to_string());
        }
        if self.bad_affiliation {
            issues.push("bad affiliation".to_string());
        }
        if !self.validated {
            issues.push("RSI handle not validated".to_string());
        }
        issues
    }

    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.eligibility_issues().is_empty()
    }
}
