use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use gubae_core::AppError;
use gubae_models::{AdminResponse, ErrorResponse, LoginRequest, LoginResponse, RegisterRequest};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register an administrator
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin registered", body = AdminResponse),
        (status = 400, description = "Validation error or admin already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AdminResponse>), AppError> {
    let admin = AuthService::register(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

/// Log in and receive an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Unknown email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.store(), &state.tokens, dto).await?;
    Ok(Json(response))
}
