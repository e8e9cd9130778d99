mod relations;
mod requests;

use std::sync::Arc;

use axum::Router;

use crate::coordinator::FollowCoordinator;
use crate::queries::FollowQueries;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<FollowCoordinator>,
    pub queries: Arc<FollowQueries>,
}

/// Build the follow API router.
///
/// All routes are relative — the caller nests them under `/follow`.
pub fn router(coordinator: Arc<FollowCoordinator>, queries: Arc<FollowQueries>) -> Router {
    let state = AppState {
        coordinator,
        queries,
    };

    Router::new()
        .merge(relations::routes())
        .merge(requests::routes())
        .with_state(state)
}
