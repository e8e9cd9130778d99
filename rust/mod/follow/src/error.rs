use thiserror::Error;

use shoal_core::ServiceError;

/// Follow subsystem error type.
///
/// `DuplicateEdge` and `DuplicatePendingRequest` exist so the coordinator
/// can turn a lost create race into an idempotent outcome instead of a
/// client-facing failure; they only escape to HTTP if a handler forgets to
/// convert them (mapped to 409).
#[derive(Debug, Error)]
pub enum FollowError {
    #[error("account '{0}' not found")]
    AccountNotFound(String),

    #[error("cannot follow yourself")]
    SelfReference,

    #[error("follow relationship already exists")]
    DuplicateEdge,

    #[error("follow request already pending")]
    DuplicatePendingRequest,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<FollowError> for ServiceError {
    fn from(e: FollowError) -> Self {
        match e {
            FollowError::AccountNotFound(_) => ServiceError::NotFound(e.to_string()),
            FollowError::SelfReference => ServiceError::Validation(e.to_string()),
            FollowError::DuplicateEdge | FollowError::DuplicatePendingRequest => {
                ServiceError::Conflict(e.to_string())
            }
            FollowError::NotFound(m) => ServiceError::NotFound(m),
            FollowError::Validation(m) => ServiceError::Validation(m),
            FollowError::Storage(m) => ServiceError::Storage(m),
            FollowError::Internal(m) => ServiceError::Internal(m),
        }
    }
}
