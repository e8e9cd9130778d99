use shoal_core::ServiceError;
use shoal_sql::SQLStore;

/// Initialize the SQLite schema for all feed resources.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS posts (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            data       TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at)",

        "CREATE TABLE IF NOT EXISTS comments (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            post_id    TEXT NOT NULL,
            data       TEXT NOT NULL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE
        )",
        "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id)",

        // One like per (user, post) — enforced by the key, not by lookups.
        "CREATE TABLE IF NOT EXISTS likes (
            user_id    TEXT NOT NULL,
            post_id    TEXT NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (user_id, post_id),
            FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE
        )",
        "CREATE INDEX IF NOT EXISTS idx_likes_post ON likes(post_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
    }

    Ok(())
}
