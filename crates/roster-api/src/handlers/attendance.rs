//! Roster handlers
//!
//! Endpoints for creating, editing, recording and publishing rosters.

use axum::{
    extract::{Path, State},
    Json,
};
use roster_core::{ChannelId, MemberId};
use roster_service::dto::{
    ApiResponse, AttendanceResponse, CreateAttendanceRequest, ImportThreadRequest,
    ListAttendanceQuery, PublishAttendanceRequest,
};
use roster_service::AttendanceService;

use crate::extractors::{
    AttendanceMemberPath, AttendancePath, OptionalValidatedJson, ValidatedJson, ValidatedQuery,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

type AttendanceJson = Json<ApiResponse<AttendanceResponse>>;

fn attendance_json(attendance: &roster_core::Attendance) -> AttendanceJson {
    Json(ApiResponse::new(AttendanceResponse::from(attendance)))
}

/// List open rosters, newest first
///
/// GET /attendance?limit=
pub async fn list_attendance(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListAttendanceQuery>,
) -> ApiResult<Json<ApiResponse<Vec<AttendanceResponse>>>> {
    let service = AttendanceService::new(state.service_context());
    let rosters = service.list_active(query.limit.unwrap_or(0)).await?;
    let data = rosters.iter().map(AttendanceResponse::from).collect();
    Ok(Json(ApiResponse::new(data)))
}

/// Open a new roster
///
/// POST /attendance
pub async fn create_attendance(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAttendanceRequest>,
) -> ApiResult<Created<AttendanceJson>> {
    let service = AttendanceService::new(state.service_context());
    let attendance = service
        .create(&request.name, MemberId::from(request.submitted_by))
        .await?;
    Ok(Created(attendance_json(&attendance)))
}

/// GET /attendance/{id}
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(path): Path<AttendancePath>,
) -> ApiResult<AttendanceJson> {
    let service = AttendanceService::new(state.service_context());
    let attendance = service.get(&path.id()?).await?;
    Ok(attendance_json(&attendance))
}

/// Drop the stored roster; a published message is left alone
///
/// DELETE /attendance/{id}
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(path): Path<AttendancePath>,
) -> ApiResult<NoContent> {
    let service = AttendanceService::new(state.service_context());
    service.delete(&path.id()?).await?;
    Ok(NoContent)
}

/// PUT /attendance/{id}/members/{member_id}
pub async fn add_member(
    State(state): State<AppState>,
    Path(path): Path<AttendanceMemberPath>,
) -> ApiResult<AttendanceJson> {
    let service = AttendanceService::new(state.service_context());
    let attendance = service.add_member(&path.id()?, &path.member_id()?).await?;
    Ok(attendance_json(&attendance))
}

/// DELETE /attendance/{id}/members/{member_id}
pub async fn remove_member(
    State(state): State<AppState>,
    Path(path): Path<AttendanceMemberPath>,
) -> ApiResult<AttendanceJson> {
    let service = AttendanceService::new(state.service_context());
    let attendance = service
        .remove_member(&path.id()?, &path.member_id()?)
        .await?;
    Ok(attendance_json(&attendance))
}

/// POST /attendance/{id}/record
pub async fn record_attendance(
    State(state): State<AppState>,
    Path(path): Path<AttendancePath>,
) -> ApiResult<AttendanceJson> {
    let service = AttendanceService::new(state.service_context());
    let attendance = service.record(&path.id()?).await?;
    Ok(attendance_json(&attendance))
}

/// POST /attendance/{id}/recheck
pub async fn recheck_issues(
    State(state): State<AppState>,
    Path(path): Path<AttendancePath>,
) -> ApiResult<AttendanceJson> {
    let service = AttendanceService::new(state.service_context());
    let attendance = service.recheck_issues(&path.id()?).await?;
    Ok(attendance_json(&attendance))
}

/// Render the roster into chat; the body is optional
///
/// POST /attendance/{id}/publish
pub async fn publish_attendance(
    State(state): State<AppState>,
    Path(path): Path<AttendancePath>,
    OptionalValidatedJson(request): OptionalValidatedJson<PublishAttendanceRequest>,
) -> ApiResult<AttendanceJson> {
    let channel_id = request
        .and_then(|r| r.channel_id)
        .map(ChannelId::from);

    let service = AttendanceService::new(state.service_context());
    let attendance = service.publish(&path.id()?, channel_id).await?;
    Ok(attendance_json(&attendance))
}

/// Rebuild a roster from the messages of a chat thread
///
/// POST /attendance/import
pub async fn import_thread(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ImportThreadRequest>,
) -> ApiResult<Created<AttendanceJson>> {
    let service = AttendanceService::new(state.service_context());
    let attendance = service
        .import_from_thread(&ChannelId::from(request.channel_id), request.limit)
        .await?;
    Ok(Created(attendance_json(&attendance)))
}
