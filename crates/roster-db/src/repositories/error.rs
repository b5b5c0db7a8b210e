//! Error handling utilities for repositories

use roster_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Row counts come back as `i64`; negative values never occur
pub fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

/// `LIMIT NULL` means no limit in PostgreSQL
pub fn to_limit(limit: usize) -> Option<i64> {
    (limit > 0).then(|| i64::try_from(limit).unwrap_or(i64::MAX))
}
