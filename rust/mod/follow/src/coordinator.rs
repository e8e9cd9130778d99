use std::sync::Arc;

use tracing::debug;

use crate::directory::AccountDirectory;
use crate::error::FollowError;
use crate::model::{FollowOutcome, FollowRequest, UnfollowOutcome};
use crate::store::RelationStore;

/// The follow state machine.
///
/// Decides, for a (requester, target) pair, whether a follow attempt
/// creates a direct edge or a pending request, and drives acceptance,
/// decline, cancellation, and unfollow. Consults the account directory
/// for privacy; reads and writes the relation store. Never holds state
/// of its own — every decision point is a store constraint or a
/// conditional delete, so concurrent calls stay safe without locks here.
pub struct FollowCoordinator {
    store: Arc<RelationStore>,
    directory: Arc<dyn AccountDirectory>,
}

impl FollowCoordinator {
    pub fn new(store: Arc<RelationStore>, directory: Arc<dyn AccountDirectory>) -> Self {
        Self { store, directory }
    }

    /// Attempt to follow `target_id` as `requester`.
    ///
    /// Public target: create the edge directly. Private target: park a
    /// pending request. Either way a duplicate is an idempotent outcome,
    /// not an error.
    pub fn request_follow(
        &self,
        requester: &str,
        target_id: &str,
    ) -> Result<FollowOutcome, FollowError> {
        let target = self
            .directory
            .get_account(target_id)
            .map_err(|e| FollowError::Storage(e.to_string()))?
            .ok_or_else(|| FollowError::AccountNotFound(target_id.to_string()))?;

        if requester == target_id {
            return Err(FollowError::SelfReference);
        }

        if target.private {
            // Already following (edge predates a privacy flip): report
            // that, don't queue a redundant request.
            if self.store.find_edge(requester, target_id)?.is_some() {
                return Ok(FollowOutcome::AlreadyFollowing);
            }
            match self.store.create_request(requester, target_id) {
                Ok(_) => {
                    debug!(requester, target_id, "follow request queued");
                    Ok(FollowOutcome::RequestSent)
                }
                Err(FollowError::DuplicatePendingRequest) => {
                    Ok(FollowOutcome::RequestAlreadyPending)
                }
                Err(e) => Err(e),
            }
        } else {
            match self.store.create_edge(requester, target_id) {
                Ok(_) => {
                    debug!(requester, target_id, "follow edge created");
                    Ok(FollowOutcome::Followed)
                }
                Err(FollowError::DuplicateEdge) => Ok(FollowOutcome::AlreadyFollowing),
                Err(e) => Err(e),
            }
        }
    }

    /// Accept a pending request addressed to `receiver`.
    ///
    /// The conditional delete of the pending row is the linearization
    /// point: a concurrent decline or cancel cannot also succeed. The
    /// edge insert that follows runs requester → receiver. A duplicate
    /// edge at that point means the pair was already following (privacy
    /// flipped mid-request); the accepted post-state holds either way.
    pub fn accept_request(
        &self,
        receiver: &str,
        requester_id: &str,
    ) -> Result<(), FollowError> {
        self.store.delete_pending_request(requester_id, receiver)?;

        match self.store.create_edge(requester_id, receiver) {
            Ok(_) | Err(FollowError::DuplicateEdge) => {
                debug!(receiver, requester_id, "follow request accepted");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Decline a pending request addressed to `receiver`. `NotFound` if
    /// there is nothing pending (including an already-resolved request).
    pub fn decline_request(
        &self,
        receiver: &str,
        requester_id: &str,
    ) -> Result<(), FollowError> {
        self.store.delete_pending_request(requester_id, receiver)
    }

    /// Withdraw the caller's own pending request to `receiver_id`.
    pub fn cancel_request(
        &self,
        requester: &str,
        receiver_id: &str,
    ) -> Result<(), FollowError> {
        self.store.delete_pending_request(requester, receiver_id)
    }

    /// Tear down whatever relationship the caller has toward `target_id`:
    /// a pending request is cancelled, else an edge is removed. The caller
    /// does not need to know which state it is in; the outcome tag says
    /// which branch fired.
    pub fn unfollow(
        &self,
        requester: &str,
        target_id: &str,
    ) -> Result<UnfollowOutcome, FollowError> {
        match self.store.delete_pending_request(requester, target_id) {
            Ok(()) => return Ok(UnfollowOutcome::RequestCancelled),
            Err(FollowError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        match self.store.delete_edge(requester, target_id) {
            Ok(()) => Ok(UnfollowOutcome::EdgeRemoved),
            Err(FollowError::NotFound(_)) => Err(FollowError::NotFound(format!(
                "no follow request or follow relationship toward '{target_id}'"
            ))),
            Err(e) => Err(e),
        }
    }

    /// Pending requests addressed to `receiver`, oldest first.
    pub fn incoming_requests(
        &self,
        receiver: &str,
    ) -> Result<Vec<FollowRequest>, FollowError> {
        self.store.pending_requests_for(receiver)
    }
}
