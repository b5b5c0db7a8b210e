//! Opaque string identifiers
//!
//! Chat platforms hand out ids as strings and rosters recovered from chat
//! text can carry arbitrary tokens, so none of these are parsed as numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Roster identifier; the join key between the store and the chat message
    AttendanceId
);
opaque_id!(
    /// Community member identifier (chat platform user id)
    MemberId
);
opaque_id!(
    /// Chat channel (or thread) identifier
    ChannelId
);
opaque_id!(
    /// Chat message identifier
    MessageId
);

impl MemberId {
    /// Chat mention token for this member, e.g. `<@1234>`
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}
