use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use gubae_core::AppError;
use gubae_models::{CreateServiceDto, ErrorResponse, Service, ServiceFilterParams, UpdateServiceDto};

use super::service::ServiceItemService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{ResourceId, ValidatedJson};

/// Add an inventory item. Quantity may be fractional but never negative.
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateServiceDto,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn create_service(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateServiceDto>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let service = ServiceItemService::create_service(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

#[utoipa::path(
    get,
    path = "/api/services",
    params(ServiceFilterParams),
    responses(
        (status = 200, description = "Service records matching the filters", body = Vec<Service>),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state))]
pub async fn get_services(
    State(state): State<AppState>,
    Query(filters): Query<ServiceFilterParams>,
) -> Result<Json<Vec<Service>>, AppError> {
    let records = ServiceItemService::get_services(state.store(), filters).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = uuid::Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service found", body = Service),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state))]
pub async fn get_service(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Service>, AppError> {
    let service = ServiceItemService::get_service(state.store(), id).await?;
    Ok(Json(service))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    params(("id" = uuid::Uuid, Path, description = "Service ID")),
    request_body = UpdateServiceDto,
    responses(
        (status = 200, description = "Service updated", body = Service),
        (status = 400, description = "Invalid id or validation error", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn update_service(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
    ValidatedJson(dto): ValidatedJson<UpdateServiceDto>,
) -> Result<Json<Service>, AppError> {
    let service = ServiceItemService::update_service(state.store(), id, dto).await?;
    Ok(Json(service))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = uuid::Uuid, Path, description = "Service ID")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Access token is missing", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.identifier()))]
pub async fn delete_service(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ResourceId(id): ResourceId,
) -> Result<StatusCode, AppError> {
    ServiceItemService::delete_service(state.store(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
