//! Axum router wiring.
//!
//! Every route, including `/healthz`, is wrapped by the oink middleware.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, handlers, layer, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/users/:id", get(handlers::show_user))
        .route("/healthz", get(ops::healthz))
        .layer(middleware::from_fn_with_state(
            state.oink(),
            layer::oink_middleware,
        ))
        .with_state(state)
}
