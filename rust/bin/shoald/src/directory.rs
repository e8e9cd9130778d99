//! Bridges the accounts service into the follow module's directory seam.

use std::sync::Arc;

use accounts::service::AccountsService;
use follow::directory::{AccountDirectory, AccountRef};
use shoal_core::ServiceError;

pub struct DirectoryAdapter {
    accounts: Arc<AccountsService>,
}

impl DirectoryAdapter {
    pub fn new(accounts: Arc<AccountsService>) -> Self {
        Self { accounts }
    }
}

impl AccountDirectory for DirectoryAdapter {
    fn get_account(&self, id: &str) -> Result<Option<AccountRef>, ServiceError> {
        let privacy = self
            .accounts
            .account_privacy(id)
            .map_err(ServiceError::from)?;
        Ok(privacy.map(|private| AccountRef {
            id: id.to_string(),
            private,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use accounts::model::CreateAccount;
    use accounts::service::{AccountsConfig, AccountsService};
    use follow::directory::AccountDirectory;
    use shoal_sql::SqliteStore;

    use super::DirectoryAdapter;
    use crate::hasher::SaltedSha256;

    #[test]
    fn adapter_reflects_existence_and_privacy() {
        let sql = Arc::new(SqliteStore::open_in_memory().unwrap());
        let svc =
            AccountsService::new(sql, Arc::new(SaltedSha256), AccountsConfig::default()).unwrap();
        let adapter = DirectoryAdapter::new(Arc::clone(&svc));

        assert!(adapter.get_account("ghost").unwrap().is_none());

        let (user, _) = svc
            .signup(CreateAccount {
                username: Some("alice".into()),
                email: Some("a@example.com".into()),
                password: Some("pw".into()),
            })
            .unwrap();

        let account = adapter.get_account(&user.id).unwrap().unwrap();
        assert!(!account.private);

        svc.update_profile(&user.id, serde_json::json!({"account_private": true}))
            .unwrap();
        let account = adapter.get_account(&user.id).unwrap().unwrap();
        assert!(account.private);
    }
}
