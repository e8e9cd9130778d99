use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Extension, Json, Router};

use shoal_core::{Claims, ServiceError, ensure_owner};

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/profiles/{user_id}",
        get(get_profile).put(update_profile),
    )
}

async fn get_profile(
    State(svc): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let profile = svc.get_profile(&user_id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!(profile)))
}

async fn update_profile(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<String>,
    Json(patch): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    ensure_owner(&claims.sub, &user_id)?;
    let profile = svc
        .update_profile(&user_id, patch)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!(profile)))
}
