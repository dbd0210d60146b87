use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_staff, delete_staff, get_staff, get_staff_member, update_staff};
use crate::state::AppState;

pub fn init_staff_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_staff).get(get_staff))
        .route(
            "/{id}",
            get(get_staff_member).put(update_staff).delete(delete_staff),
        )
}
