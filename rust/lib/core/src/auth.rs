//! Caller identity shared across modules.
//!
//! The server binary validates the bearer token and stores [`Claims`] in
//! request extensions; module handlers read the authenticated caller from
//! there. Modules never parse tokens themselves.

use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// JWT claims payload identifying the authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: String,
    /// Display name (username at issuance time).
    pub name: String,
    /// Session id the token was issued under.
    pub sid: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Require that the authenticated caller owns the given resource.
///
/// The single ownership check used everywhere a record is writable only
/// by its owner (profiles, posts, comments).
pub fn ensure_owner(caller_id: &str, owner_id: &str) -> Result<(), ServiceError> {
    if caller_id == owner_id {
        Ok(())
    } else {
        Err(ServiceError::PermissionDenied(format!(
            "user '{caller_id}' does not own this resource"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes() {
        assert!(ensure_owner("u1", "u1").is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        let err = ensure_owner("u1", "u2").unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
    }
}
