use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Extension, Json, Router};

use shoal_core::{Claims, ServiceError};

use crate::api::AppState;
use crate::model::CreateComment;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(create_comment))
        .route("/comments/{id}", axum::routing::delete(delete_comment))
}

async fn create_comment(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<CreateComment>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let created = svc.create_comment(&claims.sub, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!(created))))
}

async fn delete_comment(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_comment(&claims.sub, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
