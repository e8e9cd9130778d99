use shoal_core::{new_id, now_rfc3339};
use shoal_sql::Value;

use crate::model::{CreateAccount, TokenGrant, User};
use crate::service::{AccountsError, AccountsService};

impl AccountsService {
    /// Create a new account and issue its first token.
    ///
    /// Username/email uniqueness rides on the schema's UNIQUE columns;
    /// the default (public) profile row is created alongside.
    pub fn signup(&self, input: CreateAccount) -> Result<(User, TokenGrant), AccountsError> {
        let username = required(input.username, "username")?;
        let email = required(input.email, "email")?;
        let password = required(input.password, "password")?;

        let user = User {
            id: new_id(),
            username,
            email,
            created_at: now_rfc3339(),
        };
        let digest = self.hasher.hash(&password);
        let data = serde_json::to_string(&user)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO users (id, username, email, password_digest, data, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(user.id.clone()),
                    Value::Text(user.username.clone()),
                    Value::Text(user.email.clone()),
                    Value::Text(digest),
                    Value::Text(data),
                    Value::Text(user.created_at.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("users.username") {
                    AccountsError::Conflict(format!("username '{}' is taken", user.username))
                } else if msg.contains("users.email") {
                    AccountsError::Conflict(format!("email '{}' is registered", user.email))
                } else {
                    AccountsError::Storage(msg)
                }
            })?;

        self.create_default_profile(&user.id)?;
        let grant = self.issue_token(&user)?;

        tracing::info!(user_id = %user.id, username = %user.username, "account created");
        Ok((user, grant))
    }

    /// Verify credentials and issue a token.
    pub fn login(&self, username: &str, password: &str) -> Result<(User, TokenGrant), AccountsError> {
        let rows = self
            .sql
            .query(
                "SELECT data, password_digest FROM users WHERE username = ?1",
                &[Value::Text(username.to_string())],
            )
            .map_err(|e| AccountsError::Storage(e.to_string()))?;

        // Same failure for unknown user and wrong password.
        let row = rows
            .first()
            .ok_or_else(|| AccountsError::Unauthorized("invalid credentials".into()))?;
        let digest = row
            .get_str("password_digest")
            .ok_or_else(|| AccountsError::Internal("missing password_digest column".into()))?;

        if !self.hasher.verify(password, digest) {
            return Err(AccountsError::Unauthorized("invalid credentials".into()));
        }

        let data = row
            .get_str("data")
            .ok_or_else(|| AccountsError::Internal("missing data column".into()))?;
        let user: User = serde_json::from_str(data)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        let grant = self.issue_token(&user)?;
        Ok((user, grant))
    }

    /// Get a user by id.
    pub fn get_user(&self, id: &str) -> Result<User, AccountsError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM users WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| AccountsError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| AccountsError::NotFound(format!("user '{id}' not found")))?;
        let data = row
            .get_str("data")
            .ok_or_else(|| AccountsError::Internal("missing data column".into()))?;
        serde_json::from_str(data).map_err(|e| AccountsError::Internal(e.to_string()))
    }

    /// Existence + privacy lookup for the follow graph's directory seam.
    ///
    /// `None` if the user does not exist. A missing profile row counts as
    /// public — the profile is only materialized on first read.
    pub fn account_privacy(&self, id: &str) -> Result<Option<bool>, AccountsError> {
        let rows = self
            .sql
            .query(
                "SELECT users.id AS id, profiles.account_private AS account_private \
                 FROM users LEFT JOIN profiles ON profiles.user_id = users.id \
                 WHERE users.id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| AccountsError::Storage(e.to_string()))?;

        Ok(rows
            .first()
            .map(|row| row.get_i64("account_private").unwrap_or(0) != 0))
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AccountsError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AccountsError::Validation(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::test_service;

    fn signup_input(username: &str, email: &str) -> CreateAccount {
        CreateAccount {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some("hunter2".to_string()),
        }
    }

    #[test]
    fn signup_creates_user_profile_and_token() {
        let svc = test_service();
        let (user, grant) = svc.signup(signup_input("alice", "alice@example.com")).unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(grant.token_type, "Bearer");
        assert!(!grant.access_token.is_empty());

        // Profile row exists and defaults to public.
        assert_eq!(svc.account_privacy(&user.id).unwrap(), Some(false));
        let fetched = svc.get_user(&user.id).unwrap();
        assert_eq!(fetched.email, "alice@example.com");
    }

    #[test]
    fn signup_requires_all_fields() {
        let svc = test_service();
        let err = svc
            .signup(CreateAccount {
                username: Some("bob".into()),
                email: None,
                password: Some("pw".into()),
            })
            .unwrap_err();
        assert!(matches!(err, AccountsError::Validation(_)));
    }

    #[test]
    fn duplicate_username_conflicts() {
        let svc = test_service();
        svc.signup(signup_input("alice", "a1@example.com")).unwrap();
        let err = svc.signup(signup_input("alice", "a2@example.com")).unwrap_err();
        assert!(matches!(err, AccountsError::Conflict(_)));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn duplicate_email_conflicts() {
        let svc = test_service();
        svc.signup(signup_input("alice", "a@example.com")).unwrap();
        let err = svc.signup(signup_input("bob", "a@example.com")).unwrap_err();
        assert!(matches!(err, AccountsError::Conflict(_)));
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn login_roundtrip() {
        let svc = test_service();
        let (created, _) = svc.signup(signup_input("alice", "a@example.com")).unwrap();

        let (user, grant) = svc.login("alice", "hunter2").unwrap();
        assert_eq!(user.id, created.id);
        assert!(!grant.access_token.is_empty());
    }

    #[test]
    fn login_rejects_bad_credentials() {
        let svc = test_service();
        svc.signup(signup_input("alice", "a@example.com")).unwrap();

        assert!(matches!(
            svc.login("alice", "wrong"),
            Err(AccountsError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.login("nobody", "hunter2"),
            Err(AccountsError::Unauthorized(_))
        ));
    }

    #[test]
    fn unknown_user_lookups() {
        let svc = test_service();
        assert!(matches!(
            svc.get_user("ghost"),
            Err(AccountsError::NotFound(_))
        ));
        assert_eq!(svc.account_privacy("ghost").unwrap(), None);
    }
}
