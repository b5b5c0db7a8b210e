//! # roster-service
//!
//! Application layer: roster and voice event workflows, the chat codec
//! that renders and parses roster messages, and the API DTOs.

pub mod codec;
pub mod dto;
pub mod services;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use codec::CodecError;
pub use services::{
    AttendanceService, EventService, InteractionOutcome, InteractionService, MemberService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
