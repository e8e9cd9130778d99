use shoal_core::{merge_patch, now_rfc3339};
use shoal_sql::Value;

use crate::model::Profile;
use crate::service::{AccountsError, AccountsService};

impl AccountsService {
    /// Get a user's profile, materializing the default one on first read.
    pub fn get_profile(&self, user_id: &str) -> Result<Profile, AccountsError> {
        // 404 for the user, not the profile — profiles always "exist"
        // once the user does.
        self.get_user(user_id)?;

        let rows = self
            .sql
            .query(
                "SELECT data FROM profiles WHERE user_id = ?1",
                &[Value::Text(user_id.to_string())],
            )
            .map_err(|e| AccountsError::Storage(e.to_string()))?;

        match rows.first() {
            Some(row) => {
                let data = row
                    .get_str("data")
                    .ok_or_else(|| AccountsError::Internal("missing data column".into()))?;
                serde_json::from_str(data).map_err(|e| AccountsError::Internal(e.to_string()))
            }
            None => self.create_default_profile(user_id),
        }
    }

    /// Update a profile with JSON merge-patch semantics.
    pub fn update_profile(
        &self,
        user_id: &str,
        patch: serde_json::Value,
    ) -> Result<Profile, AccountsError> {
        let current = self.get_profile(user_id)?;
        let now = now_rfc3339();

        let mut base = serde_json::to_value(&current)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);
        // Force key fields and updated_at.
        base["user_id"] = serde_json::json!(current.user_id);
        base["created_at"] = serde_json::json!(current.created_at);
        base["updated_at"] = serde_json::json!(now);

        let updated: Profile = serde_json::from_value(base)
            .map_err(|e| AccountsError::Validation(format!("invalid profile patch: {e}")))?;
        let data = serde_json::to_string(&updated)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "UPDATE profiles SET data = ?1, account_private = ?2, updated_at = ?3 \
                 WHERE user_id = ?4",
                &[
                    Value::Text(data),
                    Value::from(updated.account_private),
                    Value::Text(now),
                    Value::Text(user_id.to_string()),
                ],
            )
            .map_err(|e| AccountsError::Storage(e.to_string()))?;

        Ok(updated)
    }

    /// Insert the default (public, empty) profile for a user.
    pub(crate) fn create_default_profile(&self, user_id: &str) -> Result<Profile, AccountsError> {
        let now = now_rfc3339();
        let profile = Profile {
            user_id: user_id.to_string(),
            display_name: None,
            bio: None,
            location: None,
            website: None,
            account_private: false,
            created_at: now.clone(),
            updated_at: now.clone(),
        };
        let data = serde_json::to_string(&profile)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO profiles (user_id, account_private, data, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(profile.user_id.clone()),
                    Value::Integer(0),
                    Value::Text(data),
                    Value::Text(now.clone()),
                    Value::Text(now),
                ],
            )
            .map_err(|e| AccountsError::Storage(e.to_string()))?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CreateAccount;
    use crate::service::test_support::test_service;

    fn make_user(svc: &AccountsService, username: &str) -> String {
        let (user, _) = svc
            .signup(CreateAccount {
                username: Some(username.to_string()),
                email: Some(format!("{username}@example.com")),
                password: Some("pw".to_string()),
            })
            .unwrap();
        user.id
    }

    #[test]
    fn profile_defaults_to_public() {
        let svc = test_service();
        let id = make_user(&svc, "alice");

        let profile = svc.get_profile(&id).unwrap();
        assert!(!profile.account_private);
        assert!(profile.display_name.is_none());
    }

    #[test]
    fn unknown_user_has_no_profile() {
        let svc = test_service();
        assert!(matches!(
            svc.get_profile("ghost"),
            Err(AccountsError::NotFound(_))
        ));
    }

    #[test]
    fn merge_patch_update() {
        let svc = test_service();
        let id = make_user(&svc, "alice");

        let updated = svc
            .update_profile(&id, serde_json::json!({"bio": "shore angler", "location": "Duluth"}))
            .unwrap();
        assert_eq!(updated.bio.as_deref(), Some("shore angler"));

        // Null removes a field; others are untouched.
        let updated = svc
            .update_profile(&id, serde_json::json!({"location": null}))
            .unwrap();
        assert_eq!(updated.bio.as_deref(), Some("shore angler"));
        assert!(updated.location.is_none());
        assert_eq!(updated.user_id, id);
    }

    #[test]
    fn privacy_flip_reaches_directory_lookup() {
        let svc = test_service();
        let id = make_user(&svc, "alice");
        assert_eq!(svc.account_privacy(&id).unwrap(), Some(false));

        svc.update_profile(&id, serde_json::json!({"account_private": true}))
            .unwrap();
        assert_eq!(svc.account_privacy(&id).unwrap(), Some(true));
    }
}
