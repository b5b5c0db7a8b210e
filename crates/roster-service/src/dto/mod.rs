//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateAttendanceRequest, ImportThreadRequest, InteractionRequest, ListAttendanceQuery,
    ListMembersQuery, PublishAttendanceRequest, SetRankRequest, StartEventRequest,
    UpsertMemberRequest,
};

pub use responses::{
    ActiveEventResponse, ApiResponse, AttendanceCountResponse, AttendanceResponse,
    EventAttendeeResponse, HealthChecks, HealthResponse, InteractionResponse, IssueResponse,
    MemberDetailResponse, MemberResponse, MessageResponse, ReadinessResponse,
};
