use shoal_sql::SQLStore;

use crate::service::AccountsError;

/// Initialize the SQLite schema for all account resources.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), AccountsError> {
    let statements = [
        // Users: identity + credential digest. The digest stays in its
        // own column, outside the serialized record.
        "CREATE TABLE IF NOT EXISTS users (
            id              TEXT PRIMARY KEY,
            username        TEXT NOT NULL UNIQUE,
            email           TEXT NOT NULL UNIQUE,
            password_digest TEXT NOT NULL,
            data            TEXT NOT NULL,
            created_at      TEXT NOT NULL
        )",

        // Profiles: one row per user, keyed by the user id.
        "CREATE TABLE IF NOT EXISTS profiles (
            user_id         TEXT PRIMARY KEY,
            account_private INTEGER NOT NULL DEFAULT 0,
            data            TEXT NOT NULL,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",

        // Sessions: token issuance records.
        "CREATE TABLE IF NOT EXISTS sessions (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            data       TEXT NOT NULL,
            issued_at  TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
        "CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)",
    ];

    for stmt in &statements {
        sql.exec(stmt, &[])
            .map_err(|e| AccountsError::Storage(e.to_string()))?;
    }

    Ok(())
}
