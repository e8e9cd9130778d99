//! Account lookup seam.
//!
//! The follow module does NOT depend on the accounts module. It only
//! knows this trait; the concrete lookup is injected at startup time.

use shoal_core::ServiceError;

/// The slice of an account the follow graph needs: existence + privacy.
#[derive(Debug, Clone)]
pub struct AccountRef {
    pub id: String,
    /// True when the account only accepts followers via pending requests.
    pub private: bool,
}

/// Read-only account directory.
///
/// `None` means the account does not exist; an `Err` means the directory
/// itself failed (storage trouble), never a missing account.
pub trait AccountDirectory: Send + Sync {
    fn get_account(&self, id: &str) -> Result<Option<AccountRef>, ServiceError>;
}
