// ABOUTME: Route definitions for the relay HTTP API.
// ABOUTME: Mounts favicon, push, and latest routes under an optional prefix behind optional Basic auth.

use axum::Router;
use axum::routing::{get, post};
use relay_core::Credentials;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;
use crate::auth::BasicAuthLayer;

/// Build the complete Axum router.
///
/// `credentials` enables the Basic-auth gate on every route when present.
/// `prefix` is either empty (routes at the root) or a path such as `/ma`.
pub fn create_router(
    state: SharedState,
    credentials: Option<Credentials>,
    prefix: &str,
) -> Router {
    let mut routes = Router::new()
        .route("/favicon.ico", get(api::favicon::favicon))
        .route("/push-url", post(api::metadata::push_url))
        .route("/latest-url", get(api::metadata::latest_url))
        .with_state(state);

    if let Some(credentials) = credentials {
        routes = routes.layer(BasicAuthLayer::new(credentials));
    }

    let router = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    };

    router.layer(TraceLayer::new_for_http())
}
