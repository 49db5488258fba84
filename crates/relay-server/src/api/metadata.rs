// ABOUTME: Push and latest-url handlers translating HTTP requests into store operations.
// ABOUTME: Push validates streamUrl and overwrites the record; latest returns it or a 404.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use relay_core::{PushRejected, StreamMetadataRecord};

use crate::app_state::SharedState;

/// Body of the 404 returned when nothing has been pushed yet.
pub const NO_URL_MESSAGE: &str =
    "No URL available, please check if Music Assistant has pushed a URL to the API";

/// POST /push-url - Replace the stored record with the pushed metadata.
pub async fn push_url(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // A body sent without a JSON content type is read as an empty object.
    let payload: &[u8] = if is_json_content_type(&headers) {
        body.as_ref()
    } else {
        &[]
    };

    let record = match StreamMetadataRecord::from_push_body(payload) {
        Ok(record) => record,
        Err(rejected @ PushRejected::MissingStreamUrl) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": rejected.to_string() })),
            )
                .into_response();
        }
    };

    tracing::info!(?record, "received stream metadata");

    if let Err(e) = state.store.put(&record).await {
        tracing::error!("failed to store stream metadata: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "failed to store stream metadata" })),
        )
            .into_response();
    }

    Json(serde_json::json!({ "status": "ok" })).into_response()
}

/// GET /latest-url - Return the last pushed record.
pub async fn latest_url(State(state): State<SharedState>) -> Response {
    let record = match state.store.get().await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("failed to read stream metadata: {}", e);
            None
        }
    };

    match record {
        Some(record) => Json(record).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": NO_URL_MESSAGE })),
        )
            .into_response(),
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
