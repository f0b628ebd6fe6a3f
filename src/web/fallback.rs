use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Final fallback of the router.
///
/// Returns `404 Not Found` with the same JSON error shape as
/// authentication failures, so API clients only parse one format.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "message": "no such route" })),
    )
}
