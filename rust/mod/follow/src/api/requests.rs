use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use shoal_core::{Claims, ServiceError};

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests))
        .route("/requests/{requester_id}/@accept", post(accept_request))
        .route("/requests/{requester_id}/@decline", post(decline_request))
}

/// GET /follow/requests — the caller's pending incoming requests.
async fn list_requests(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let items = state
        .coordinator
        .incoming_requests(&claims.sub)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "items": items })))
}

/// POST /follow/requests/{requester_id}/@accept — receiver-side acceptance.
async fn accept_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(requester_id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state
        .coordinator
        .accept_request(&claims.sub, &requester_id)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "detail": "follow request accepted" })))
}

/// POST /follow/requests/{requester_id}/@decline — receiver-side decline.
async fn decline_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(requester_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    state
        .coordinator
        .decline_request(&claims.sub, &requester_id)
        .map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
