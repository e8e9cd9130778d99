use shoal_core::{ListParams, ListResult, ServiceError, ensure_owner, new_id, now_rfc3339};
use shoal_sql::{Row, Value};

use crate::model::{CreatePost, Post, PostDetail};
use crate::service::FeedService;

impl FeedService {
    /// Create a post authored by the caller.
    pub fn create_post(&self, author: &str, input: CreatePost) -> Result<Post, ServiceError> {
        let content = match input.content {
            Some(c) if !c.trim().is_empty() => c,
            _ => return Err(ServiceError::Validation("content is required".into())),
        };

        let now = now_rfc3339();
        let post = Post {
            id: new_id(),
            user_id: author.to_string(),
            content,
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        let data =
            serde_json::to_string(&post).map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO posts (id, user_id, data, created_at) VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::Text(post.id.clone()),
                    Value::Text(post.user_id.clone()),
                    Value::Text(data),
                    Value::Text(now),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        tracing::debug!(post_id = %post.id, author, "post created");
        Ok(post)
    }

    /// Get a post with its comments and likes inline.
    pub fn get_post(&self, id: &str) -> Result<PostDetail, ServiceError> {
        let post = self.fetch_post(id)?;
        let comments = self.comments_for(id)?;
        let likes = self.likes_for(id)?;
        Ok(PostDetail {
            post,
            comments,
            likes,
        })
    }

    /// List posts, newest first.
    pub fn list_posts(&self, params: &ListParams) -> Result<ListResult<Post>, ServiceError> {
        let count_rows = self
            .sql
            .query("SELECT COUNT(*) as cnt FROM posts", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        let total = count_rows
            .first()
            .and_then(|r| r.get_i64("cnt"))
            .unwrap_or(0) as usize;

        let rows = self
            .sql
            .query(
                "SELECT data FROM posts ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
                &[
                    Value::Integer(params.limit as i64),
                    Value::Integer(params.offset as i64),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let items = rows
            .iter()
            .map(row_to_post)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListResult { items, total })
    }

    /// Update a post's content. Owner-only.
    pub fn update_post(
        &self,
        caller: &str,
        id: &str,
        input: CreatePost,
    ) -> Result<Post, ServiceError> {
        let mut post = self.fetch_post(id)?;
        ensure_owner(caller, &post.user_id)?;

        if let Some(content) = input.content {
            if content.trim().is_empty() {
                return Err(ServiceError::Validation("content must not be empty".into()));
            }
            post.content = content;
        }
        post.updated_at = now_rfc3339();

        let data =
            serde_json::to_string(&post).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.sql
            .exec(
                "UPDATE posts SET data = ?1 WHERE id = ?2",
                &[Value::Text(data), Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(post)
    }

    /// Delete a post. Owner-only; comments and likes cascade.
    pub fn delete_post(&self, caller: &str, id: &str) -> Result<(), ServiceError> {
        let post = self.fetch_post(id)?;
        ensure_owner(caller, &post.user_id)?;

        self.sql
            .exec(
                "DELETE FROM posts WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    pub(crate) fn fetch_post(&self, id: &str) -> Result<Post, ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM posts WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("post '{id}' not found")))?;
        row_to_post(row)
    }
}

/// Deserialize a Post from a row's `data` JSON column.
fn row_to_post(row: &Row) -> Result<Post, ServiceError> {
    let json = row
        .get_str("data")
        .ok_or_else(|| ServiceError::Storage("missing data column".into()))?;
    serde_json::from_str(json).map_err(|e| ServiceError::Storage(format!("bad post json: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::test_service;

    fn post_input(content: &str) -> CreatePost {
        CreatePost {
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn create_and_get() {
        let svc = test_service();
        let post = svc.create_post("u1", post_input("first cast of the day")).unwrap();

        let detail = svc.get_post(&post.id).unwrap();
        assert_eq!(detail.post.content, "first cast of the day");
        assert!(detail.comments.is_empty());
        assert!(detail.likes.is_empty());
    }

    #[test]
    fn empty_content_is_rejected() {
        let svc = test_service();
        assert!(matches!(
            svc.create_post("u1", post_input("  ")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn list_is_newest_first() {
        let svc = test_service();
        svc.create_post("u1", post_input("one")).unwrap();
        svc.create_post("u1", post_input("two")).unwrap();

        let result = svc.list_posts(&ListParams::default()).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.items[0].content, "two");
    }

    #[test]
    fn update_is_owner_only() {
        let svc = test_service();
        let post = svc.create_post("u1", post_input("draft")).unwrap();

        let updated = svc.update_post("u1", &post.id, post_input("final")).unwrap();
        assert_eq!(updated.content, "final");

        assert!(matches!(
            svc.update_post("u2", &post.id, post_input("hijack")),
            Err(ServiceError::PermissionDenied(_))
        ));
    }

    #[test]
    fn delete_is_owner_only_and_cascades() {
        let svc = test_service();
        let post = svc.create_post("u1", post_input("gone soon")).unwrap();
        svc.create_comment(
            "u2",
            crate::model::CreateComment {
                post_id: Some(post.id.clone()),
                content: Some("nice".into()),
            },
        )
        .unwrap();

        assert!(matches!(
            svc.delete_post("u2", &post.id),
            Err(ServiceError::PermissionDenied(_))
        ));

        svc.delete_post("u1", &post.id).unwrap();
        assert!(matches!(
            svc.get_post(&post.id),
            Err(ServiceError::NotFound(_))
        ));
    }
}
