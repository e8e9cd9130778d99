use serde::{Deserialize, Serialize};

/// An accepted, directed follow relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowEdge {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// The account doing the following.
    pub follower_id: String,

    /// The account being followed.
    pub followee_id: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// A pending ask to follow a private account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowRequest {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// The account asking to follow.
    pub requester_id: String,

    /// The private account being asked.
    pub receiver_id: String,

    /// Lifecycle state; only `pending` rows are ever served.
    pub status: RequestStatus,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Follow request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }
}

/// Outcome of a follow attempt.
///
/// Duplicates are idempotent successes, not errors: retrying a follow
/// reports the state that already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// Edge created (public target).
    Followed,
    /// An edge already existed for this pair.
    AlreadyFollowing,
    /// Pending request created (private target).
    RequestSent,
    /// A pending request already existed for this pair.
    RequestAlreadyPending,
}

impl FollowOutcome {
    /// Whether this attempt created new state (drives 201 vs 200).
    pub fn created(&self) -> bool {
        matches!(self, FollowOutcome::Followed | FollowOutcome::RequestSent)
    }

    /// Human-readable detail string for the HTTP response.
    pub fn detail(&self) -> &'static str {
        match self {
            FollowOutcome::Followed => "followed",
            FollowOutcome::AlreadyFollowing => "already following",
            FollowOutcome::RequestSent => "follow request sent",
            FollowOutcome::RequestAlreadyPending => "follow request already pending",
        }
    }
}

/// Which branch a teardown took: cancelled a pending request, or removed
/// an accepted edge. Callers invoke one action without knowing which state
/// the relationship is in; the tag tells them what actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfollowOutcome {
    RequestCancelled,
    EdgeRemoved,
}
