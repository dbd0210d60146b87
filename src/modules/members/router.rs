use axum::{
    Router,
    routing::{get, post, put},
};

use super::controller::{
    create_member, delete_member, get_alumni, get_member, get_members, transfer_to_alumni,
    update_member,
};
use crate::state::AppState;

pub fn init_members_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_member).get(get_members))
        .route("/alumni", get(get_alumni))
        .route("/transfer-to-alumni", put(transfer_to_alumni))
        .route(
            "/{id}",
            get(get_member).put(update_member).delete(delete_member),
        )
}
