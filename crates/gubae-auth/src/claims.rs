//! Token claims.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in an access token.
///
/// The identifier of the authenticated principal is the administrator's
/// email address, stored in the standard `sub` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Authenticated identifier (administrator email)
    pub sub: String,
    /// Issued-at timestamp (Unix seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn identifier(&self) -> &str {
        &self.sub
    }
}
