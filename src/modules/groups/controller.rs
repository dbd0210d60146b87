use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use gubae_core::AppError;
use gubae_models::{
    CreateGroupDto, ErrorResponse, Group, GroupFilterParams, GroupWithMemberCount, Member,
    UpdateGroupDto,
};

use super::service::GroupService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ResourceId, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupDto,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn create_group(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateGroupDto>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    let group = GroupService::create_group(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    params(GroupFilterParams),
    responses(
        (status = 200, description = "Groups matching the filters", body = Vec<Group>),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn get_groups(
    State(state): State<AppState>,
    Query(filters): Query<GroupFilterParams>,
) -> Result<Json<Vec<Group>>, AppError> {
    let groups = GroupService::get_groups(state.store(), filters).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/with-count",
    responses(
        (status = 200, description = "Groups with their member counts", body = Vec<GroupWithMemberCount>),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn get_groups_with_member_count(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupWithMemberCount>>, AppError> {
    let groups = GroupService::get_groups_with_member_count(state.store()).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/{id}",
    params(("id" = uuid::Uuid, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group found", body = Group),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn get_group(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Group>, AppError> {
    let group = GroupService::get_group(state.store(), id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups/{id}/members",
    params(("id" = uuid::Uuid, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Members of the group", body = Vec<Member>),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
#[instrument(skip(state))]
pub async fn get_group_members(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Vec<Member>>, AppError> {
    let members = GroupService::get_group_members(state.store(), id).await?;
    Ok(Json(members))
}

#[utoipa::path(
    put,
    path = "/api/groups/{id}",
    params(("id" = uuid::Uuid, Path, description = "Group ID")),
    request_body = UpdateGroupDto,
    responses(
        (status = 200, description = "Group updated", body = Group),
        (status = 400, description = "Invalid id or validation error", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn update_group(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateGroupDto>,
) -> Result<Json<Group>, AppError> {
    let group = GroupService::update_group(state.store(), id, dto).await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{id}",
    params(("id" = uuid::Uuid, Path, description = "Group ID")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Groups"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn delete_group(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, AppError> {
    GroupService::delete_group(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
