//! Follow module — the follow/follow-request graph.
//!
//! # Resources
//!
//! - **FollowEdge** — an accepted, directed follow relationship
//! - **FollowRequest** — a pending ask to follow a private account
//!
//! The module owns the relationship state machine: following a public
//! account creates an edge directly; following a private account parks a
//! pending request that the receiver accepts or declines. Uniqueness of
//! edges and pending requests is enforced by the storage schema, so
//! concurrent duplicate attempts resolve to exactly one winner.
//!
//! Account privacy is read through the [`directory::AccountDirectory`]
//! trait; the concrete lookup (the accounts module) is injected at startup.
//!
//! # Usage
//!
//! ```ignore
//! use follow::FollowModule;
//!
//! let module = FollowModule::new(sql, directory)?;
//! let router = module.routes(); // Mount under /follow
//! ```

pub mod api;
pub mod coordinator;
pub mod directory;
pub mod error;
pub mod model;
pub mod queries;
pub mod store;

use std::sync::Arc;

use axum::Router;

use shoal_core::Module;
use shoal_sql::SQLStore;

use crate::coordinator::FollowCoordinator;
use crate::directory::AccountDirectory;
use crate::queries::FollowQueries;
use crate::store::RelationStore;

/// Follow module implementing the Module trait.
pub struct FollowModule {
    coordinator: Arc<FollowCoordinator>,
    queries: Arc<FollowQueries>,
}

impl FollowModule {
    /// Create a new FollowModule, initializing the relationship schema.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        directory: Arc<dyn AccountDirectory>,
    ) -> Result<Self, shoal_core::ServiceError> {
        let store = Arc::new(RelationStore::new(sql).map_err(shoal_core::ServiceError::from)?);
        let coordinator = Arc::new(FollowCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&directory),
        ));
        let queries = Arc::new(FollowQueries::new(store, directory));
        Ok(Self {
            coordinator,
            queries,
        })
    }

    /// Get a reference to the coordinator (used by tests and embedding).
    pub fn coordinator(&self) -> &Arc<FollowCoordinator> {
        &self.coordinator
    }
}

impl Module for FollowModule {
    fn name(&self) -> &str {
        "follow"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.coordinator), Arc::clone(&self.queries))
    }
}
