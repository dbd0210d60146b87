use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_service, delete_service, get_service, get_services, update_service};
use crate::state::AppState;

pub fn init_services_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_service).get(get_services))
        .route(
            "/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}
