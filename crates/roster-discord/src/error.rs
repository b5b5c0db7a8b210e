//! Discord client errors

use roster_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("{endpoint}: request failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint}: Discord returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint}: unexpected response body: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid Discord client configuration: {0}")]
    Config(String),
}

impl DiscordError {
    /// HTTP status Discord answered with, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<DiscordError> for DomainError {
    fn from(err: DiscordError) -> Self {
        match err {
            DiscordError::Config(msg) => DomainError::ConfigurationError(msg),
            other => DomainError::ChatError(other.to_string()),
        }
    }
}
