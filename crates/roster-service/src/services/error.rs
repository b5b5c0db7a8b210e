//! Service layer error types
//!
//! Provides a unified error type for all roster and event operations.

use roster_common::AppError;
use roster_core::DomainError;
use std::fmt;

use crate::codec::CodecError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or not-found from a port
    Domain(DomainError),

    /// Chat message does not match the roster grammar
    Parse(CodecError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Conflict (e.g., roster already recorded)
    Conflict(String),

    /// Missing or invalid wiring
    Configuration(String),

    /// Store or chat failure, tagged with the operation that hit it
    Dependency {
        operation: &'static str,
        source: DomainError,
    },

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "Parse failure: {e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            Self::Dependency { operation, source } => write!(f, "{operation} failed: {source}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) | Self::Dependency { source: e, .. } => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Tag a store or chat failure with the operation that hit it
    ///
    /// Not-found, validation and conflict errors pass through unchanged.
    #[must_use]
    pub fn with_operation(self, operation: &'static str) -> Self {
        match self {
            Self::Domain(source) if source.is_dependency() => Self::Dependency { operation, source },
            other => other,
        }
    }

    /// Whether a backing store or the chat platform failed
    pub fn is_dependency(&self) -> bool {
        match self {
            Self::Dependency { .. } => true,
            Self::Domain(e) => e.is_dependency(),
            _ => false,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) | Self::Dependency { source: e, .. } => domain_status(e),
            Self::Parse(_) => 422,
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) | Self::Dependency { source: e, .. } => e.code(),
            Self::Parse(_) => "PARSE_FAILURE",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else if matches!(e, DomainError::ChatError(_)) {
        502
    } else {
        500
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<CodecError> for ServiceError {
    fn from(err: CodecError) -> Self {
        Self::Parse(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Parse(e) => AppError::InvalidInput(e.to_string()),
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Configuration(msg) => AppError::Config(msg),
            ServiceError::Dependency {
                operation,
                source: DomainError::ChatError(msg),
            } => AppError::ExternalService(format!("{operation}: {msg}")),
            ServiceError::Dependency { operation, source } => {
                AppError::Database(format!("{operation}: {source}"))
            }
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Attach operation context to port results
pub trait OperationExt<T> {
    fn during(self, operation: &'static str) -> ServiceResult<T>;
}

impl<T> OperationExt<T> for Result<T, DomainError> {
    fn during(self, operation: &'static str) -> ServiceResult<T> {
        self.map_err(|e| ServiceError::from(e).with_operation(operation))
    }
}
