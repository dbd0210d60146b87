use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use gubae_core::AppError;
use gubae_models::{CreateStaffDto, ErrorResponse, Staff, StaffFilterParams, UpdateStaffDto};

use super::service::StaffService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ResourceId, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/staff",
    request_body = CreateStaffDto,
    responses(
        (status = 201, description = "Staff created", body = Staff),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn create_staff(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStaffDto>,
) -> Result<(StatusCode, Json<Staff>), AppError> {
    let staff = StaffService::create_staff(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

/// List staff, optionally filtered by name, email or job type
#[utoipa::path(
    get,
    path = "/api/staff",
    params(StaffFilterParams),
    responses(
        (status = 200, description = "Staff records matching the filters", body = Vec<Staff>),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn get_staff(
    State(state): State<AppState>,
    Query(filters): Query<StaffFilterParams>,
) -> Result<Json<Vec<Staff>>, AppError> {
    let records = StaffService::get_staff(state.store(), filters).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    params(("id" = uuid::Uuid, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Staff found", body = Staff),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Staff not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn get_staff_member(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Staff>, AppError> {
    let staff = StaffService::get_staff_member(state.store(), id).await?;
    Ok(Json(staff))
}

#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    params(("id" = uuid::Uuid, Path, description = "Staff ID")),
    request_body = UpdateStaffDto,
    responses(
        (status = 200, description = "Staff updated", body = Staff),
        (status = 400, description = "Invalid id or validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Staff not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn update_staff(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateStaffDto>,
) -> Result<Json<Staff>, AppError> {
    let staff = StaffService::update_staff(state.store(), id, dto).await?;
    Ok(Json(staff))
}

#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    params(("id" = uuid::Uuid, Path, description = "Staff ID")),
    responses(
        (status = 204, description = "Staff deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Staff not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn delete_staff(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, AppError> {
    StaffService::delete_staff(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
