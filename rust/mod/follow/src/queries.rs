use std::sync::Arc;

use crate::directory::AccountDirectory;
use crate::error::FollowError;
use crate::store::RelationStore;

/// Read-only follower/following lookups.
///
/// Independent of the coordinator: listings go straight to the relation
/// store after an existence check. The listings themselves are NOT gated
/// by the viewed account's privacy flag — only follow initiation is.
pub struct FollowQueries {
    store: Arc<RelationStore>,
    directory: Arc<dyn AccountDirectory>,
}

impl FollowQueries {
    pub fn new(store: Arc<RelationStore>, directory: Arc<dyn AccountDirectory>) -> Self {
        Self { store, directory }
    }

    /// Ids of accounts following `account_id`, in follow order.
    pub fn followers(&self, account_id: &str) -> Result<Vec<String>, FollowError> {
        self.ensure_exists(account_id)?;
        self.store.list_followers(account_id)
    }

    /// Ids of accounts `account_id` follows, in follow order.
    pub fn following(&self, account_id: &str) -> Result<Vec<String>, FollowError> {
        self.ensure_exists(account_id)?;
        self.store.list_following(account_id)
    }

    fn ensure_exists(&self, account_id: &str) -> Result<(), FollowError> {
        self.directory
            .get_account(account_id)
            .map_err(|e| FollowError::Storage(e.to_string()))?
            .ok_or_else(|| FollowError::AccountNotFound(account_id.to_string()))?;
        Ok(())
    }
}
