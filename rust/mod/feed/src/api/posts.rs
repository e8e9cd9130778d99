use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};

use shoal_core::{Claims, ListParams, ServiceError};

use crate::api::AppState;
use crate::model::{CreatePost, LikeOutcome};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/{id}/@like", post(like_post))
        .route("/posts/{id}/@unlike", post(unlike_post))
}

async fn list_posts(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_posts(&params)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn create_post(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let created = svc.create_post(&claims.sub, input)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!(created))))
}

async fn get_post(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let detail = svc.get_post(&id)?;
    Ok(Json(serde_json::json!(detail)))
}

async fn update_post(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(input): Json<CreatePost>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let updated = svc.update_post(&claims.sub, &id, input)?;
    Ok(Json(serde_json::json!(updated)))
}

async fn delete_post(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_post(&claims.sub, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn like_post(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let outcome = svc.like(&claims.sub, &id)?;
    Ok(match outcome {
        LikeOutcome::Liked => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "detail": "liked" })),
        ),
        LikeOutcome::AlreadyLiked => (
            StatusCode::OK,
            Json(serde_json::json!({ "detail": "already liked" })),
        ),
    })
}

async fn unlike_post(
    State(svc): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.unlike(&claims.sub, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
