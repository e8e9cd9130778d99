mod comments;
mod posts;

use std::sync::Arc;

use axum::Router;

use crate::service::FeedService;

/// Shared application state.
pub type AppState = Arc<FeedService>;

/// Build the feed API router.
///
/// All routes are relative — the caller nests them under `/feed`.
pub fn build_router(svc: Arc<FeedService>) -> Router {
    Router::new()
        .merge(posts::routes())
        .merge(comments::routes())
        .with_state(svc)
}
