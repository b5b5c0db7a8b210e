//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AttendanceId, ChannelId, MemberId, MessageId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Attendance not found: {0}")]
    AttendanceNotFound(AttendanceId),

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("No event is being tracked in channel {0}")]
    ActiveEventNotFound(ChannelId),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No one is in voice chats!")]
    NoParticipants,

    #[error("Too many participants: max {max}")]
    TooManyParticipants { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("There is already an event being tracked.")]
    EventAlreadyActive,

    #[error("Attendance {0} has already been recorded")]
    AlreadyRecorded(AttendanceId),

    #[error("Attendance {0} already exists")]
    AttendanceExists(AttendanceId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Chat platform error: {0}")]
    ChatError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::AttendanceNotFound(_) => "UNKNOWN_ATTENDANCE",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::ActiveEventNotFound(_) => "UNKNOWN_EVENT",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NoParticipants => "NO_PARTICIPANTS",
            Self::TooManyParticipants { .. } => "TOO_MANY_PARTICIPANTS",

            // Conflict
            Self::EventAlreadyActive => "EVENT_ALREADY_ACTIVE",
            Self::AlreadyRecorded(_) => "ALREADY_RECORDED",
            Self::AttendanceExists(_) => "ATTENDANCE_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::ChatError(_) => "CHAT_ERROR",
            Self::ConfigurationError(_) => "CONFIGURATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AttendanceNotFound(_)
                | Self::MemberNotFound(_)
                | Self::ActiveEventNotFound(_)
                | Self::MessageNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::NoParticipants | Self::TooManyParticipants { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EventAlreadyActive | Self::AlreadyRecorded(_) | Self::AttendanceExists(_)
        )
    }

    /// Check if a backing dependency (store, chat platform) failed
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::ChatError(_))
    }
}
