use serde::{Deserialize, Serialize};

/// A token issuance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session id, carried in the token as `sid`.
    pub id: String,

    /// User the token was issued to.
    pub user_id: String,

    /// RFC 3339 issuance timestamp.
    pub issued_at: String,

    /// RFC 3339 expiry timestamp.
    pub expires_at: String,
}
