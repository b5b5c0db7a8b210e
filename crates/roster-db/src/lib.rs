//! # roster-db
//!
//! Database layer implementing the roster-core ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and schema setup
//! - Database models with SQLx `FromRow` derives
//! - Record ↔ Model mappers
//! - Repository implementations (rosters, member directory, active events)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::{create_pool, run_migrations, PgAttendanceRepository, PoolConfig};
//!
//! async fn example(config: &roster_common::DatabaseConfig) -> Result<(), sqlx::Error> {
//!     let pool = create_pool(&PoolConfig::from(config)).await?;
//!     run_migrations(&pool).await?;
//!     let attendance_repo = PgAttendanceRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgActiveEventRepository, PgAttendanceRepository, PgMemberDirectory};
