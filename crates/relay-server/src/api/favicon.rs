// ABOUTME: Favicon handler serving an optional icon file from disk.
// ABOUTME: Answers 204 with an empty body when no icon is present so clients stop retrying.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::app_state::SharedState;

/// GET /favicon.ico - Serve the configured icon, or 204 if there is none.
pub async fn favicon(State(state): State<SharedState>, req: Request) -> Response {
    let Some(path) = state.favicon_path.as_ref() else {
        return StatusCode::NO_CONTENT.into_response();
    };

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return StatusCode::NO_CONTENT.into_response();
    }

    match ServeFile::new(path).oneshot(req).await {
        Ok(resp) => resp.into_response(),
        Err(never) => match never {},
    }
}
