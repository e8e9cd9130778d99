pub mod comment;
pub mod like;
pub mod post;
pub mod schema;

use std::sync::Arc;

use shoal_core::ServiceError;
use shoal_sql::SQLStore;

/// Feed service — content CRUD over the shared SQL store.
///
/// Uses the shared `ServiceError` directly: nothing here needs error
/// kinds beyond the common set.
pub struct FeedService {
    pub(crate) sql: Arc<dyn SQLStore>,
}

impl FeedService {
    /// Create a new FeedService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SQLStore>) -> Result<Arc<Self>, ServiceError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use shoal_sql::SqliteStore;

    use super::FeedService;

    pub fn test_service() -> Arc<FeedService> {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        FeedService::new(sql).unwrap()
    }
}
