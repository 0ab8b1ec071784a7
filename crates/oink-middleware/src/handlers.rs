//! Demo endpoints that exercise the instance registry.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension,
};

use oink_core::RouteParams;

use crate::app_state::AppState;

/// `GET /users/:id`: instantiates one `User` plus `id % 4` `Post`s.
pub async fn show_user(State(state): State<AppState>, Path(id): Path<u64>) -> impl IntoResponse {
    let registry = state.registry();
    registry.record("User");
    registry.record_n("Post", id % 4);

    (
        Extension(RouteParams::new("users", "show")),
        format!("user {id}"),
    )
}
