//! Protected resource handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/resources
///
/// Requires a full-scope access credential; provisional credentials are
/// rejected by the extractor. Returns 204 when the catalog is empty.
pub async fn list_resources(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Response, ApiError> {
    let resources = state.resources.list().await?;

    if resources.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(ApiResponse::ok(resources)).into_response())
}
