//! Member handlers
//!
//! Directory maintenance plus the per-member attendance count.

use axum::{
    extract::{Path, State},
    Json,
};
use roster_service::dto::{
    ApiResponse, AttendanceCountResponse, ListMembersQuery, MemberDetailResponse, SetRankRequest,
    UpsertMemberRequest,
};
use roster_service::{AttendanceService, MemberService};

use crate::extractors::{MemberPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

type MemberJson = Json<ApiResponse<MemberDetailResponse>>;

/// List directory members by name
///
/// GET /members?limit=
pub async fn list_members(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListMembersQuery>,
) -> ApiResult<Json<ApiResponse<Vec<MemberDetailResponse>>>> {
    let service = MemberService::new(state.service_context());
    let members = service.list(query.limit.unwrap_or(0)).await?;
    let data = members.into_iter().map(MemberDetailResponse::from).collect();
    Ok(Json(ApiResponse::new(data)))
}

/// GET /members/{member_id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(path): Path<MemberPath>,
) -> ApiResult<MemberJson> {
    let service = MemberService::new(state.service_context());
    let status = service.get(&path.member_id()?).await?;
    Ok(Json(ApiResponse::new(status.into())))
}

/// Insert or replace a member's directory record
///
/// PUT /members/{member_id}
pub async fn upsert_member(
    State(state): State<AppState>,
    Path(path): Path<MemberPath>,
    ValidatedJson(request): ValidatedJson<UpsertMemberRequest>,
) -> ApiResult<MemberJson> {
    let service = MemberService::new(state.service_context());
    let status = service.upsert(path.member_id()?, request).await?;
    Ok(Json(ApiResponse::new(status.into())))
}

/// PUT /members/{member_id}/rank
pub async fn set_rank(
    State(state): State<AppState>,
    Path(path): Path<MemberPath>,
    ValidatedJson(request): ValidatedJson<SetRankRequest>,
) -> ApiResult<MemberJson> {
    let service = MemberService::new(state.service_context());
    let status = service.set_rank(&path.member_id()?, &request.rank).await?;
    Ok(Json(ApiResponse::new(status.into())))
}

/// DELETE /members/{member_id}
pub async fn delete_member(
    State(state): State<AppState>,
    Path(path): Path<MemberPath>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.delete(&path.member_id()?).await?;
    Ok(NoContent)
}

/// Number of recorded rosters a member appears in
///
/// GET /members/{member_id}/attendance
pub async fn get_attendance_count(
    State(state): State<AppState>,
    Path(path): Path<MemberPath>,
) -> ApiResult<Json<ApiResponse<AttendanceCountResponse>>> {
    let member_id = path.member_id()?;
    let service = AttendanceService::new(state.service_context());
    let count = service.member_attendance_count(&member_id).await?;

    Ok(Json(ApiResponse::new(AttendanceCountResponse {
        member_id: member_id.into_inner(),
        count,
    })))
}
