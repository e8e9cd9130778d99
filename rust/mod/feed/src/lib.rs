//! Feed module — posts, comments, and likes.
//!
//! Plain CRUD over the content records. A post serializes with its
//! comments and likes inline; likes are idempotent per (user, post).

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use shoal_core::Module;
use shoal_sql::SQLStore;

use crate::service::FeedService;

/// Feed module implementing the Module trait.
pub struct FeedModule {
    service: Arc<FeedService>,
}

impl FeedModule {
    /// Create a new FeedModule, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Self, shoal_core::ServiceError> {
        let service = FeedService::new(sql)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying FeedService.
    pub fn service(&self) -> &Arc<FeedService> {
        &self.service
    }
}

impl Module for FeedModule {
    fn name(&self) -> &str {
        "feed"
    }

    fn routes(&self) -> Router {
        api::build_router(Arc::clone(&self.service))
    }
}
