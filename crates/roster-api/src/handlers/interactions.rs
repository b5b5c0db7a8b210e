//! Interaction handler
//!
//! Button presses are forwarded by the bot gateway as a channel id plus the
//! pressed component's custom id.

use axum::{extract::State, Json};
use roster_core::ChannelId;
use roster_service::dto::{ApiResponse, InteractionRequest, InteractionResponse};
use roster_service::InteractionService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /interactions
pub async fn handle_interaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<InteractionRequest>,
) -> ApiResult<Json<ApiResponse<InteractionResponse>>> {
    let service = InteractionService::new(state.service_context());
    let outcome = service
        .handle(&ChannelId::from(request.channel_id), &request.custom_id)
        .await?;
    Ok(Json(ApiResponse::new(outcome.into())))
}
