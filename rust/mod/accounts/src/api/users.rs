use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use shoal_core::ServiceError;

use crate::api::AppState;
use crate::model::{CreateAccount, LoginRequest};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/users/{id}", get(get_user))
}

async fn signup(
    State(svc): State<AppState>,
    Json(input): Json<CreateAccount>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let (user, grant) = svc.signup(input).map_err(ServiceError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "user": user, "token": grant })),
    ))
}

async fn login(
    State(svc): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let username = input
        .username
        .ok_or_else(|| ServiceError::Validation("username is required".into()))?;
    let password = input
        .password
        .ok_or_else(|| ServiceError::Validation("password is required".into()))?;

    let (user, grant) = svc.login(&username, &password).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "token": grant, "user_id": user.id })))
}

async fn get_user(
    State(svc): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc.get_user(&id).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!(user)))
}
