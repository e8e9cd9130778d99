use serde::{Deserialize, Serialize};

/// A user identity.
///
/// The password digest is NOT part of this record — it lives in its own
/// storage column and never leaves the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Login name, unique across the system.
    pub username: String,

    /// Email address, unique across the system.
    pub email: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for signup. Fields are optional at the serde level so missing
/// ones surface as a validation failure, not a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccount {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Input for login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// An issued access token.
#[derive(Debug, Clone, Serialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
