//! Request guards.
//!
//! Every resource router is wrapped in [`auth::require_auth`] with
//! `route_layer`, so a handler only runs once the bearer token has been
//! verified. The verified claims travel to handlers as [`auth::AuthUser`].
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` takes the second whitespace-separated segment as the token
//! 3. No token: 401 `Access token is missing`
//! 4. Token fails verification: 403 with the codec's reason
//! 5. Otherwise the claims are stored in the request extensions
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//! use crate::middleware::auth::{AuthUser, require_auth};
//!
//! async fn whoami(auth_user: AuthUser) -> String {
//!     auth_user.identifier().to_string()
//! }
//!
//! let routes = Router::new()
//!     .route("/whoami", get(whoami))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;
