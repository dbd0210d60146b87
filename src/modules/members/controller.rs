use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use gubae_core::AppError;
use gubae_models::{
    CreateMemberDto, ErrorResponse, Member, MemberFilterParams, MemberWithGroup,
    TransferMembersDto, TransferMembersResponse, UpdateMemberDto,
};

use super::service::MemberService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ResourceId, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = CreateMemberDto,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn create_member(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateMemberDto>,
) -> Result<(StatusCode, Json<Member>), AppError> {
    let member = MemberService::create_member(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    get,
    path = "/api/members",
    params(MemberFilterParams),
    responses(
        (status = 200, description = "All members, alumni included", body = Vec<MemberWithGroup>),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(state))]
pub async fn get_members(
    State(state): State<AppState>,
    Query(filters): Query<MemberFilterParams>,
) -> Result<Json<Vec<MemberWithGroup>>, AppError> {
    let members = MemberService::get_members(state.store(), filters).await?;
    Ok(Json(members))
}

#[utoipa::path(
    get,
    path = "/api/members/alumni",
    responses(
        (status = 200, description = "Members who completed their studies", body = Vec<MemberWithGroup>),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(state))]
pub async fn get_alumni(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberWithGroup>>, AppError> {
    let alumni = MemberService::get_alumni(state.store()).await?;
    Ok(Json(alumni))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(("id" = uuid::Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member with its group", body = MemberWithGroup),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(state))]
pub async fn get_member(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<MemberWithGroup>, AppError> {
    let member = MemberService::get_member(state.store(), id).await?;
    Ok(Json(member))
}

#[utoipa::path(
    put,
    path = "/api/members/{id}",
    params(("id" = uuid::Uuid, Path, description = "Member ID")),
    request_body = UpdateMemberDto,
    responses(
        (status = 200, description = "Member updated", body = MemberWithGroup),
        (status = 400, description = "Invalid id, validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn update_member(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateMemberDto>,
) -> Result<Json<MemberWithGroup>, AppError> {
    let member = MemberService::update_member(state.store(), id, dto).await?;
    Ok(Json(member))
}

#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(("id" = uuid::Uuid, Path, description = "Member ID")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn delete_member(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, AppError> {
    MemberService::delete_member(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move members to the alumni list
#[utoipa::path(
    put,
    path = "/api/members/transfer-to-alumni",
    request_body = TransferMembersDto,
    responses(
        (status = 200, description = "Members transferred", body = TransferMembersResponse),
        (status = 400, description = "No member IDs provided", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "No member matched", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Members"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn transfer_to_alumni(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<TransferMembersDto>,
) -> Result<Json<TransferMembersResponse>, AppError> {
    let response = MemberService::transfer_to_alumni(state.store(), dto.member_ids).await?;
    Ok(Json(response))
}
