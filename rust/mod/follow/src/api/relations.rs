use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Deserialize;

use shoal_core::{Claims, ServiceError};

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_relations).post(follow))
        .route("/{user_id}", axum::routing::delete(unfollow))
}

/// Body for POST /follow. `target_id` is optional at the serde level so a
/// missing field surfaces as a 400, not a deserialization rejection.
#[derive(Debug, Deserialize)]
struct FollowBody {
    #[serde(default)]
    target_id: Option<String>,
}

/// Query for GET /follow. The `followers`/`following` flags arrive as
/// bare keys (`?user_id=U&followers`), which deserialize to `Some("")`.
#[derive(Debug, Deserialize)]
struct RelationQuery {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    followers: Option<String>,
    #[serde(default)]
    following: Option<String>,
}

async fn follow(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<FollowBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let target_id = body
        .target_id
        .ok_or_else(|| ServiceError::Validation("target_id is required".into()))?;

    let outcome = state
        .coordinator
        .request_follow(&claims.sub, &target_id)
        .map_err(ServiceError::from)?;

    let status = if outcome.created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(serde_json::json!({ "detail": outcome.detail() }))))
}

async fn list_relations(
    State(state): State<AppState>,
    Query(query): Query<RelationQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user_id = query
        .user_id
        .ok_or_else(|| ServiceError::Validation("user_id is required".into()))?;

    let items = if query.followers.is_some() {
        state.queries.followers(&user_id)
    } else if query.following.is_some() {
        state.queries.following(&user_id)
    } else {
        return Err(ServiceError::Validation(
            "specify either 'followers' or 'following' in the query parameters".into(),
        ));
    }
    .map_err(ServiceError::from)?;

    Ok(Json(serde_json::json!({ "items": items })))
}

async fn unfollow(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    // Cancels a pending request or removes an edge; either way 204.
    state
        .coordinator
        .unfollow(&claims.sub, &user_id)
        .map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
