pub mod profile;
pub mod schema;
pub mod session;
pub mod user;

use std::sync::Arc;

use thiserror::Error;

use shoal_sql::SQLStore;

use crate::hasher::PasswordHasher;

/// Accounts service error type.
#[derive(Debug, Error)]
pub enum AccountsError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<AccountsError> for shoal_core::ServiceError {
    fn from(e: AccountsError) -> Self {
        match e {
            AccountsError::NotFound(m) => shoal_core::ServiceError::NotFound(m),
            AccountsError::Conflict(m) => shoal_core::ServiceError::Conflict(m),
            AccountsError::Validation(m) => shoal_core::ServiceError::Validation(m),
            AccountsError::Unauthorized(m) => shoal_core::ServiceError::Unauthorized(m),
            AccountsError::Storage(m) => shoal_core::ServiceError::Storage(m),
            AccountsError::Internal(m) => shoal_core::ServiceError::Internal(m),
        }
    }
}

/// Configuration for the accounts service.
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default: 24h).
    pub token_ttl: i64,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "shoal-dev-secret-change-me".to_string(),
            token_ttl: 86400, // 24h
        }
    }
}

/// The Accounts service. Holds storage, the password digest seam, and
/// token configuration.
pub struct AccountsService {
    pub(crate) sql: Arc<dyn SQLStore>,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) config: AccountsConfig,
}

impl AccountsService {
    /// Create a new AccountsService, initializing the DB schema.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        hasher: Arc<dyn PasswordHasher>,
        config: AccountsConfig,
    ) -> Result<Arc<Self>, AccountsError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self {
            sql,
            hasher,
            config,
        }))
    }
}
