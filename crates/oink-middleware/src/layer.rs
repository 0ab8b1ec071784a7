//! axum middleware wrapping every request in an oink report.
//!
//! Install with `axum::middleware::from_fn_with_state(oink, oink_middleware)`.
//!
//! Routing metadata for axum:
//! - a [`RouteParams`] extension on the response, set by the handler that
//!   served the request, is the current-style descriptor;
//! - a [`RouteParams`] extension on the request, set by an outer layer, is
//!   the historical one;
//! - otherwise the request path is used.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use oink_core::{Oink, RequestMeta, RouteParams};

/// Run the downstream service, then write the report. The response is
/// returned exactly as the downstream produced it.
pub async fn oink_middleware(State(oink): State<Oink>, request: Request, next: Next) -> Response {
    let mut meta = request_meta(&request);

    let response = next.run(request).await;

    meta.dispatch_params = response.extensions().get::<RouteParams>().cloned();
    if let Err(e) = oink.report(&meta) {
        tracing::error!(error = %e, path = ?meta.path, "oink report aborted");
    }
    response
}

/// Metadata that must be captured before the request is handed downstream.
pub fn request_meta(request: &Request) -> RequestMeta {
    RequestMeta {
        dispatch_params: None,
        legacy_params: request.extensions().get::<RouteParams>().cloned(),
        path: Some(request.uri().path().to_string()),
    }
}
