use std::sync::Arc;

use shoal_core::{new_id, now_rfc3339};
use shoal_sql::{Row, SQLStore, Value};

use crate::error::FollowError;
use crate::model::{FollowEdge, FollowRequest, RequestStatus};

/// Persistent storage for follow edges and follow requests.
///
/// Uniqueness is the schema's job, not the caller's: `follow_edges` carries
/// a UNIQUE over the ordered pair, and `follow_requests` a partial unique
/// index over pending rows. Concurrent duplicate creates therefore resolve
/// at the INSERT — exactly one wins, the rest see the constraint error.
pub struct RelationStore {
    db: Arc<dyn SQLStore>,
}

impl RelationStore {
    /// Create a new RelationStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, FollowError> {
        let statements = [
            "CREATE TABLE IF NOT EXISTS follow_edges (
                id          TEXT PRIMARY KEY,
                follower_id TEXT NOT NULL,
                followee_id TEXT NOT NULL,
                data        TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                UNIQUE (follower_id, followee_id)
            )",
            "CREATE INDEX IF NOT EXISTS idx_edges_followee ON follow_edges(followee_id)",
            "CREATE TABLE IF NOT EXISTS follow_requests (
                id           TEXT PRIMARY KEY,
                requester_id TEXT NOT NULL,
                receiver_id  TEXT NOT NULL,
                status       TEXT NOT NULL,
                data         TEXT NOT NULL,
                created_at   TEXT NOT NULL
            )",
            // Only PENDING rows are unique per pair; resolved rows never
            // block a later re-request.
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_requests_pending
                ON follow_requests(requester_id, receiver_id) WHERE status = 'pending'",
            "CREATE INDEX IF NOT EXISTS idx_requests_receiver
                ON follow_requests(receiver_id, status)",
        ];
        for stmt in &statements {
            db.exec(stmt, &[])
                .map_err(|e| FollowError::Storage(format!("relation schema init: {e}")))?;
        }
        Ok(Self { db })
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    /// Insert a new follow edge.
    ///
    /// Fails with `DuplicateEdge` if one already exists for the ordered
    /// pair, `SelfReference` if follower == followee.
    pub fn create_edge(
        &self,
        follower: &str,
        followee: &str,
    ) -> Result<FollowEdge, FollowError> {
        if follower == followee {
            return Err(FollowError::SelfReference);
        }

        let edge = FollowEdge {
            id: new_id(),
            follower_id: follower.to_string(),
            followee_id: followee.to_string(),
            created_at: now_rfc3339(),
        };
        let data = serde_json::to_string(&edge)
            .map_err(|e| FollowError::Internal(e.to_string()))?;

        self.db
            .exec(
                "INSERT INTO follow_edges (id, follower_id, followee_id, data, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(edge.id.clone()),
                    Value::Text(edge.follower_id.clone()),
                    Value::Text(edge.followee_id.clone()),
                    Value::Text(data),
                    Value::Text(edge.created_at.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    FollowError::DuplicateEdge
                } else {
                    FollowError::Storage(msg)
                }
            })?;

        Ok(edge)
    }

    /// Delete the edge for an ordered pair. `NotFound` if absent.
    pub fn delete_edge(&self, follower: &str, followee: &str) -> Result<(), FollowError> {
        let affected = self
            .db
            .exec(
                "DELETE FROM follow_edges WHERE follower_id = ?1 AND followee_id = ?2",
                &[Value::Text(follower.to_string()), Value::Text(followee.to_string())],
            )
            .map_err(|e| FollowError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(FollowError::NotFound(format!(
                "no follow from '{follower}' to '{followee}'"
            )));
        }
        Ok(())
    }

    /// Look up the edge for an ordered pair. Absence is not an error.
    pub fn find_edge(
        &self,
        follower: &str,
        followee: &str,
    ) -> Result<Option<FollowEdge>, FollowError> {
        let rows = self
            .db
            .query(
                "SELECT data FROM follow_edges WHERE follower_id = ?1 AND followee_id = ?2",
                &[Value::Text(follower.to_string()), Value::Text(followee.to_string())],
            )
            .map_err(|e| FollowError::Storage(e.to_string()))?;

        rows.first().map(row_to_edge).transpose()
    }

    /// Follower ids of an account, in edge insertion order.
    pub fn list_followers(&self, followee: &str) -> Result<Vec<String>, FollowError> {
        self.list_ids(
            "SELECT follower_id AS account_id FROM follow_edges \
             WHERE followee_id = ?1 ORDER BY created_at ASC",
            followee,
        )
    }

    /// Ids an account follows, in edge insertion order.
    pub fn list_following(&self, follower: &str) -> Result<Vec<String>, FollowError> {
        self.list_ids(
            "SELECT followee_id AS account_id FROM follow_edges \
             WHERE follower_id = ?1 ORDER BY created_at ASC",
            follower,
        )
    }

    fn list_ids(&self, sql: &str, id: &str) -> Result<Vec<String>, FollowError> {
        let rows = self
            .db
            .query(sql, &[Value::Text(id.to_string())])
            .map_err(|e| FollowError::Storage(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.get_str("account_id")
                    .map(str::to_string)
                    .ok_or_else(|| FollowError::Internal("missing account_id column".into()))
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    /// Insert a new pending follow request.
    ///
    /// Fails with `DuplicatePendingRequest` if a pending request already
    /// exists for the ordered pair, `SelfReference` if requester == receiver.
    pub fn create_request(
        &self,
        requester: &str,
        receiver: &str,
    ) -> Result<FollowRequest, FollowError> {
        if requester == receiver {
            return Err(FollowError::SelfReference);
        }

        let request = FollowRequest {
            id: new_id(),
            requester_id: requester.to_string(),
            receiver_id: receiver.to_string(),
            status: RequestStatus::Pending,
            created_at: now_rfc3339(),
        };
        let data = serde_json::to_string(&request)
            .map_err(|e| FollowError::Internal(e.to_string()))?;

        self.db
            .exec(
                "INSERT INTO follow_requests \
                 (id, requester_id, receiver_id, status, data, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(request.id.clone()),
                    Value::Text(request.requester_id.clone()),
                    Value::Text(request.receiver_id.clone()),
                    Value::Text(request.status.as_str().to_string()),
                    Value::Text(data),
                    Value::Text(request.created_at.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    FollowError::DuplicatePendingRequest
                } else {
                    FollowError::Storage(msg)
                }
            })?;

        Ok(request)
    }

    /// Delete the pending request for an ordered pair. `NotFound` if absent.
    ///
    /// The `status = 'pending'` guard makes this the linearization point
    /// for accept/decline/cancel: of any set of concurrent resolvers,
    /// exactly one observes affected == 1.
    pub fn delete_pending_request(
        &self,
        requester: &str,
        receiver: &str,
    ) -> Result<(), FollowError> {
        let affected = self
            .db
            .exec(
                "DELETE FROM follow_requests \
                 WHERE requester_id = ?1 AND receiver_id = ?2 AND status = 'pending'",
                &[Value::Text(requester.to_string()), Value::Text(receiver.to_string())],
            )
            .map_err(|e| FollowError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(FollowError::NotFound(format!(
                "no pending follow request from '{requester}' to '{receiver}'"
            )));
        }
        Ok(())
    }

    /// Look up the pending request for an ordered pair. Absence is not an error.
    pub fn find_pending_request(
        &self,
        requester: &str,
        receiver: &str,
    ) -> Result<Option<FollowRequest>, FollowError> {
        let rows = self
            .db
            .query(
                "SELECT data FROM follow_requests \
                 WHERE requester_id = ?1 AND receiver_id = ?2 AND status = 'pending'",
                &[Value::Text(requester.to_string()), Value::Text(receiver.to_string())],
            )
            .map_err(|e| FollowError::Storage(e.to_string()))?;

        rows.first().map(row_to_request).transpose()
    }

    /// All pending requests addressed to a receiver, oldest first.
    pub fn pending_requests_for(
        &self,
        receiver: &str,
    ) -> Result<Vec<FollowRequest>, FollowError> {
        let rows = self
            .db
            .query(
                "SELECT data FROM follow_requests \
                 WHERE receiver_id = ?1 AND status = 'pending' ORDER BY created_at ASC",
                &[Value::Text(receiver.to_string())],
            )
            .map_err(|e| FollowError::Storage(e.to_string()))?;

        rows.iter().map(row_to_request).collect()
    }
}

/// Deserialize a FollowEdge from a row's `data` JSON column.
fn row_to_edge(row: &Row) -> Result<FollowEdge, FollowError> {
    let json = row
        .get_str("data")
        .ok_or_else(|| FollowError::Storage("missing data column".into()))?;
    serde_json::from_str(json)
        .map_err(|e| FollowError::Storage(format!("bad edge json: {e}")))
}

/// Deserialize a FollowRequest from a row's `data` JSON column.
fn row_to_request(row: &Row) -> Result<FollowRequest, FollowError> {
    let json = row
        .get_str("data")
        .ok_or_else(|| FollowError::Storage("missing data column".into()))?;
    serde_json::from_str(json)
        .map_err(|e| FollowError::Storage(format!("bad request json: {e}")))
}
