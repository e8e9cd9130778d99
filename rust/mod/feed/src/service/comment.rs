use shoal_core::{ServiceError, new_id, now_rfc3339};
use shoal_sql::{Row, Value};

use crate::model::{Comment, CreateComment};
use crate::service::FeedService;

impl FeedService {
    /// Create a comment authored by the caller on an existing post.
    pub fn create_comment(
        &self,
        author: &str,
        input: CreateComment,
    ) -> Result<Comment, ServiceError> {
        let post_id = input
            .post_id
            .ok_or_else(|| ServiceError::Validation("post_id is required".into()))?;
        let content = match input.content {
            Some(c) if !c.trim().is_empty() => c,
            _ => return Err(ServiceError::Validation("content is required".into())),
        };

        // 404 before insert so a bad post_id isn't a storage error.
        self.fetch_post(&post_id)?;

        let comment = Comment {
            id: new_id(),
            user_id: author.to_string(),
            post_id,
            content,
            created_at: now_rfc3339(),
        };
        let data = serde_json::to_string(&comment)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO comments (id, user_id, post_id, data, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(comment.id.clone()),
                    Value::Text(comment.user_id.clone()),
                    Value::Text(comment.post_id.clone()),
                    Value::Text(data),
                    Value::Text(comment.created_at.clone()),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(comment)
    }

    /// Delete a comment. Allowed to the comment author or the post author.
    pub fn delete_comment(&self, caller: &str, id: &str) -> Result<(), ServiceError> {
        let comment = self.fetch_comment(id)?;
        let post = self.fetch_post(&comment.post_id)?;

        if caller != comment.user_id && caller != post.user_id {
            return Err(ServiceError::PermissionDenied(format!(
                "user '{caller}' may not delete this comment"
            )));
        }

        self.sql
            .exec(
                "DELETE FROM comments WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Comments on a post, oldest first.
    pub(crate) fn comments_for(&self, post_id: &str) -> Result<Vec<Comment>, ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM comments WHERE post_id = ?1 ORDER BY created_at ASC",
                &[Value::Text(post_id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        rows.iter().map(row_to_comment).collect()
    }

    fn fetch_comment(&self, id: &str) -> Result<Comment, ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM comments WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("comment '{id}' not found")))?;
        row_to_comment(row)
    }
}

/// Deserialize a Comment from a row's `data` JSON column.
fn row_to_comment(row: &Row) -> Result<Comment, ServiceError> {
    let json = row
        .get_str("data")
        .ok_or_else(|| ServiceError::Storage("missing data column".into()))?;
    serde_json::from_str(json)
        .map_err(|e| ServiceError::Storage(format!("bad comment json: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CreatePost;
    use crate::service::test_support::test_service;

    fn comment_input(post_id: &str, content: &str) -> CreateComment {
        CreateComment {
            post_id: Some(post_id.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn comment_appears_on_post_detail() {
        let svc = test_service();
        let post = svc
            .create_post("u1", CreatePost { content: Some("pb largemouth".into()) })
            .unwrap();

        svc.create_comment("u2", comment_input(&post.id, "what bait?")).unwrap();
        svc.create_comment("u1", comment_input(&post.id, "jig and craw")).unwrap();

        let detail = svc.get_post(&post.id).unwrap();
        assert_eq!(detail.comments.len(), 2);
        assert_eq!(detail.comments[0].content, "what bait?");
    }

    #[test]
    fn comment_on_missing_post_is_not_found() {
        let svc = test_service();
        assert!(matches!(
            svc.create_comment("u1", comment_input("ghost", "hello")),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn author_or_post_owner_may_delete() {
        let svc = test_service();
        let post = svc
            .create_post("owner", CreatePost { content: Some("x".into()) })
            .unwrap();
        let c1 = svc.create_comment("commenter", comment_input(&post.id, "one")).unwrap();
        let c2 = svc.create_comment("commenter", comment_input(&post.id, "two")).unwrap();

        // A third party may not.
        assert!(matches!(
            svc.delete_comment("stranger", &c1.id),
            Err(ServiceError::PermissionDenied(_))
        ));

        // The comment author may.
        svc.delete_comment("commenter", &c1.id).unwrap();
        // The post owner may.
        svc.delete_comment("owner", &c2.id).unwrap();

        assert!(svc.get_post(&post.id).unwrap().comments.is_empty());
    }
}
