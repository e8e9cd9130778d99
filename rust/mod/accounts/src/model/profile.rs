use serde::{Deserialize, Serialize};

/// Per-user public profile. Auto-created with defaults on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user id (also the record key).
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// True when follows of this account go through pending requests.
    #[serde(default)]
    pub account_private: bool,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}
