//! Voice event handlers
//!
//! Endpoints for the per-channel attendance toggle board.

use axum::{
    extract::{Path, State},
    Json,
};
use roster_core::MemberId;
use roster_service::dto::{ActiveEventResponse, ApiResponse, MessageResponse, StartEventRequest};
use roster_service::EventService;

use crate::extractors::{ChannelMemberPath, ChannelPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

type EventJson = Json<ApiResponse<ActiveEventResponse>>;

/// GET /channels/{channel_id}/event
pub async fn get_event(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
) -> ApiResult<EventJson> {
    let service = EventService::new(state.service_context());
    let event = service.get(&path.channel_id()?).await?;
    Ok(Json(ApiResponse::new(event.into())))
}

/// Post a board for the given voice participants
///
/// POST /channels/{channel_id}/event
pub async fn start_event(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
    ValidatedJson(request): ValidatedJson<StartEventRequest>,
) -> ApiResult<Created<EventJson>> {
    let participants: Vec<MemberId> = request
        .participants
        .into_iter()
        .map(MemberId::from)
        .collect();

    let service = EventService::new(state.service_context());
    let event = service
        .start(
            &path.channel_id()?,
            MemberId::from(request.started_by),
            &participants,
        )
        .await?;
    Ok(Created(Json(ApiResponse::new(event.into()))))
}

/// POST /channels/{channel_id}/event/toggle/{member_id}
pub async fn toggle_attendee(
    State(state): State<AppState>,
    Path(path): Path<ChannelMemberPath>,
) -> ApiResult<EventJson> {
    let service = EventService::new(state.service_context());
    let event = service
        .toggle(&path.channel_id()?, &path.member_id()?)
        .await?;
    Ok(Json(ApiResponse::new(event.into())))
}

/// Post the summary and close the board
///
/// POST /channels/{channel_id}/event/submit
pub async fn submit_event(
    State(state): State<AppState>,
    Path(path): Path<ChannelPath>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let service = EventService::new(state.service_context());
    let summary = service.submit(&path.channel_id()?).await?;
    Ok(Json(ApiResponse::new(summary.into())))
}
