//! Accounts module — identities, profiles, and credential checks.
//!
//! # Resources
//!
//! - **User** — identity with unique username/email
//! - **Profile** — per-user public fields + the account privacy flag
//! - **Session** — token issuance record
//!
//! Password hashing mechanics are NOT implemented here: the module only
//! knows the [`hasher::PasswordHasher`] trait, and the binary injects the
//! concrete scheme at startup.
//!
//! # Usage
//!
//! ```ignore
//! use accounts::{AccountsModule, service::AccountsConfig};
//!
//! let module = AccountsModule::new(sql, hasher, AccountsConfig::default())?;
//! let router = module.routes(); // Mount under /accounts
//! ```

pub mod api;
pub mod hasher;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use shoal_core::Module;
use shoal_sql::SQLStore;

use crate::hasher::PasswordHasher;
use crate::service::{AccountsConfig, AccountsService};

/// Accounts module implementing the Module trait.
pub struct AccountsModule {
    service: Arc<AccountsService>,
}

impl AccountsModule {
    /// Create a new AccountsModule, initializing the DB schema.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        hasher: Arc<dyn PasswordHasher>,
        config: AccountsConfig,
    ) -> Result<Self, shoal_core::ServiceError> {
        let service = AccountsService::new(sql, hasher, config)
            .map_err(shoal_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying AccountsService.
    pub fn service(&self) -> &Arc<AccountsService> {
        &self.service
    }
}

impl Module for AccountsModule {
    fn name(&self) -> &str {
        "accounts"
    }

    fn routes(&self) -> Router {
        api::build_router(Arc::clone(&self.service))
    }
}
