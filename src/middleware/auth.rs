use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use gubae_auth::{Claims, TokenCodec, TokenVerification};
use gubae_core::AppError;

use crate::state::AppState;

pub const MISSING_TOKEN: &str = "Access token is missing";
pub const INVALID_TOKEN: &str = "Invalid access token";

/// Claims of the administrator making the request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn identifier(&self) -> &str {
        self.0.identifier()
    }
}

/// Second whitespace-separated segment of the `Authorization` header.
///
/// The scheme word is not checked: `Token abc` yields `abc` just like
/// `Bearer abc`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_whitespace()
        .nth(1)
}

pub fn authenticate(tokens: &TokenCodec, headers: &HeaderMap) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers).ok_or_else(|| AppError::unauthorized(MISSING_TOKEN))?;

    match tokens.verify(token) {
        TokenVerification::Valid(claims) => Ok(AuthUser(claims)),
        TokenVerification::Invalid { reason } if reason.is_empty() => {
            Err(AppError::forbidden(INVALID_TOKEN))
        }
        TokenVerification::Invalid { reason } => Err(AppError::forbidden(reason)),
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = authenticate(&state.tokens, req.headers())?;
    debug!(admin = %auth_user.identifier(), "Authenticated request");

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(MISSING_TOKEN))
    }
}
