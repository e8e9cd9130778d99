mod profiles;
mod users;

use std::sync::Arc;

use axum::Router;

use crate::service::AccountsService;

/// Shared application state.
pub type AppState = Arc<AccountsService>;

/// Build the accounts API router.
///
/// All routes are relative — the caller nests them under `/accounts`.
pub fn build_router(svc: Arc<AccountsService>) -> Router {
    Router::new()
        .merge(users::routes())
        .merge(profiles::routes())
        .with_state(svc)
}
