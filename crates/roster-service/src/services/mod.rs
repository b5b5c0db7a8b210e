//! Roster workflows
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates the
//! ports for one concern.

pub mod attendance;
pub mod context;
pub mod error;
pub mod event;
pub mod interaction;
pub mod locks;
pub mod member;

pub use attendance::{AttendanceService, RosterOutcome, DEFAULT_THREAD_FETCH_LIMIT};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{OperationExt, ServiceError, ServiceResult};
pub use event::{EventOutcome, EventService};
pub use interaction::{InteractionOutcome, InteractionService};
pub use locks::{EventLocks, KeyGuard, KeyedLocks, RosterLocks};
pub use member::{MemberService, MemberStatus};
