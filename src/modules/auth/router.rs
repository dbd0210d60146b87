use axum::{Router, routing::post};

use super::controller::{login_admin, register_admin};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_admin))
        .route("/login", post(login_admin))
}
