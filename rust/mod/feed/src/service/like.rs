use shoal_core::{ServiceError, now_rfc3339};
use shoal_sql::{Row, Value};

use crate::model::{Like, LikeOutcome};
use crate::service::FeedService;

impl FeedService {
    /// Like a post. Liking twice reports `AlreadyLiked` instead of failing;
    /// the composite key on (user, post) settles concurrent attempts.
    pub fn like(&self, user: &str, post_id: &str) -> Result<LikeOutcome, ServiceError> {
        self.fetch_post(post_id)?;

        let result = self.sql.exec(
            "INSERT INTO likes (user_id, post_id, created_at) VALUES (?1, ?2, ?3)",
            &[
                Value::Text(user.to_string()),
                Value::Text(post_id.to_string()),
                Value::Text(now_rfc3339()),
            ],
        );

        match result {
            Ok(_) => Ok(LikeOutcome::Liked),
            Err(e) if e.to_string().contains("UNIQUE constraint") => {
                Ok(LikeOutcome::AlreadyLiked)
            }
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    /// Remove a like. Unliking a post that was never liked is a
    /// validation failure (matching the follow-on 400).
    pub fn unlike(&self, user: &str, post_id: &str) -> Result<(), ServiceError> {
        self.fetch_post(post_id)?;

        let affected = self
            .sql
            .exec(
                "DELETE FROM likes WHERE user_id = ?1 AND post_id = ?2",
                &[Value::Text(user.to_string()), Value::Text(post_id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::Validation("not liked yet".into()));
        }
        Ok(())
    }

    /// Likes of a post, oldest first.
    pub(crate) fn likes_for(&self, post_id: &str) -> Result<Vec<Like>, ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT user_id, post_id, created_at FROM likes \
                 WHERE post_id = ?1 ORDER BY created_at ASC",
                &[Value::Text(post_id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_like).collect()
    }
}

fn row_to_like(row: &Row) -> Result<Like, ServiceError> {
    let field = |name: &str| {
        row.get_str(name)
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Storage(format!("missing {name} column")))
    };
    Ok(Like {
        user_id: field("user_id")?,
        post_id: field("post_id")?,
        created_at: field("created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CreatePost;
    use crate::service::test_support::test_service;

    #[test]
    fn like_is_idempotent() {
        let svc = test_service();
        let post = svc
            .create_post("u1", CreatePost { content: Some("x".into()) })
            .unwrap();

        assert_eq!(svc.like("u2", &post.id).unwrap(), LikeOutcome::Liked);
        assert_eq!(svc.like("u2", &post.id).unwrap(), LikeOutcome::AlreadyLiked);

        let detail = svc.get_post(&post.id).unwrap();
        assert_eq!(detail.likes.len(), 1);
        assert_eq!(detail.likes[0].user_id, "u2");
    }

    #[test]
    fn unlike_requires_a_like() {
        let svc = test_service();
        let post = svc
            .create_post("u1", CreatePost { content: Some("x".into()) })
            .unwrap();

        assert!(matches!(
            svc.unlike("u2", &post.id),
            Err(ServiceError::Validation(_))
        ));

        svc.like("u2", &post.id).unwrap();
        svc.unlike("u2", &post.id).unwrap();
        assert!(svc.get_post(&post.id).unwrap().likes.is_empty());
    }

    #[test]
    fn like_of_missing_post_is_not_found() {
        let svc = test_service();
        assert!(matches!(
            svc.like("u1", "ghost"),
            Err(ServiceError::NotFound(_))
        ));
    }
}
