use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use gubae_core::AppError;
use gubae_models::{CreateTeacherDto, ErrorResponse, Teacher, TeacherFilterParams, UpdateTeacherDto};

use super::service::TeacherService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ResourceId, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = Teacher),
        (status = 400, description = "Validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn create_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = TeacherService::create_teacher(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/api/teachers",
    params(TeacherFilterParams),
    responses(
        (status = 200, description = "Teacher records matching the filters", body = Vec<Teacher>),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teachers(
    State(state): State<AppState>,
    Query(filters): Query<TeacherFilterParams>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let records = TeacherService::get_teachers(state.store(), filters).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(("id" = uuid::Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher found", body = Teacher),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn get_teacher(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher(state.store(), id).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(("id" = uuid::Uuid, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 400, description = "Invalid id or validation error or email already exists", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn update_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::update_teacher(state.store(), id, dto).await?;
    Ok(Json(teacher))
}

/// Remove a teacher
#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(("id" = uuid::Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Teacher deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, AppError> {
    TeacherService::delete_teacher(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
