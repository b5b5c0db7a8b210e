//! Route definitions
//!
//! Roster routes are mounted under /api/v1; health probes sit at the root.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{attendance, events, health, interactions, members};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(attendance_routes())
        .merge(member_routes())
        .merge(interaction_routes())
        .merge(event_routes())
}

/// Roster routes
fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/attendance",
            get(attendance::list_attendance).post(attendance::create_attendance),
        )
        .route("/attendance/import", post(attendance::import_thread))
        .route(
            "/attendance/:id",
            get(attendance::get_attendance).delete(attendance::delete_attendance),
        )
        .route(
            "/attendance/:id/members/:member_id",
            put(attendance::add_member).delete(attendance::remove_member),
        )
        .route("/attendance/:id/record", post(attendance::record_attendance))
        .route("/attendance/:id/recheck", post(attendance::recheck_issues))
        .route("/attendance/:id/publish", post(attendance::publish_attendance))
}

/// Member directory and per-member counts
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(members::list_members))
        .route(
            "/members/:member_id",
            get(members::get_member)
                .put(members::upsert_member)
                .delete(members::delete_member),
        )
        .route("/members/:member_id/rank", put(members::set_rank))
        .route(
            "/members/:member_id/attendance",
            get(members::get_attendance_count),
        )
}

/// Button presses forwarded from chat
fn interaction_routes() -> Router<AppState> {
    Router::new().route("/interactions", post(interactions::handle_interaction))
}

/// Voice attendance boards, one per channel
fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/event",
            get(events::get_event).post(events::start_event),
        )
        .route(
            "/channels/:channel_id/event/toggle/:member_id",
            post(events::toggle_attendee),
        )
        .route("/channels/:channel_id/event/submit", post(events::submit_event))
}
