use serde::{Deserialize, Serialize};

/// A post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Author user id.
    pub user_id: String,

    pub content: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// A post with its comments and likes inline, as served by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
    pub likes: Vec<Like>,
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Author user id.
    pub user_id: String,

    /// The post this comment belongs to.
    pub post_id: String,

    pub content: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// A like of a post. The (user, post) pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user_id: String,
    pub post_id: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for creating a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    #[serde(default)]
    pub content: Option<String>,
}

/// Input for creating a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Outcome of a like attempt — liking twice is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    AlreadyLiked,
}
