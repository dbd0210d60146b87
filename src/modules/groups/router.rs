use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{
    create_group, delete_group, get_group, get_group_members, get_groups,
    get_groups_with_member_count, update_group,
};
use crate::state::AppState;

pub fn init_groups_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_group).get(get_groups))
        .route("/with-count", get(get_groups_with_member_count))
        .route(
            "/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route("/{id}/members", get(get_group_members))
}
