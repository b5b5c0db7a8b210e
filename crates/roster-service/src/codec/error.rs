//! Parse failures for chat renderings

use thiserror::Error;

/// A chat message did not match the roster grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Message has no embed")]
    MissingEmbed,

    #[error("Roster id not found in footer or description")]
    MissingId,

    #[error("Thread needs at least two messages, got {0}")]
    ThreadTooShort(usize),

    #[error("Last thread message does not reply to a roster")]
    MissingReference,

    #[error("Malformed roster opening line: {0:?}")]
    MalformedOpening(String),

    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Invalid grammar pattern: {0}")]
    Pattern(String),
}

impl CodecError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingEmbed => "MISSING_EMBED",
            Self::MissingId => "MISSING_ROSTER_ID",
            Self::ThreadTooShort(_) => "THREAD_TOO_SHORT",
            Self::MissingReference => "MISSING_REFERENCE",
            Self::MalformedOpening(_) => "MALFORMED_OPENING",
            Self::UnknownComponent(_) => "UNKNOWN_COMPONENT",
            Self::Pattern(_) => "INVALID_PATTERN",
        }
    }
}
