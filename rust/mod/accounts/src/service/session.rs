use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use shoal_core::{Claims, new_id};
use shoal_sql::Value;

use crate::model::{Session, TokenGrant, User};
use crate::service::{AccountsError, AccountsService};

impl AccountsService {
    /// Issue a signed access token for a user and record the session.
    pub fn issue_token(&self, user: &User) -> Result<TokenGrant, AccountsError> {
        let session_id = new_id();
        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::seconds(self.config.token_ttl);

        let claims = Claims {
            sub: user.id.clone(),
            name: user.username.clone(),
            sid: session_id.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AccountsError::Internal(format!("JWT encode failed: {e}")))?;

        let session = Session {
            id: session_id,
            user_id: user.id.clone(),
            issued_at: now.to_rfc3339(),
            expires_at: expires.to_rfc3339(),
        };
        let data = serde_json::to_string(&session)
            .map_err(|e| AccountsError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO sessions (id, user_id, data, issued_at, expires_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    Value::Text(session.id.clone()),
                    Value::Text(session.user_id.clone()),
                    Value::Text(data),
                    Value::Text(session.issued_at.clone()),
                    Value::Text(session.expires_at.clone()),
                ],
            )
            .map_err(|e| AccountsError::Storage(e.to_string()))?;

        Ok(TokenGrant {
            access_token: token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.token_ttl,
        })
    }

    /// Verify and decode an access token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AccountsError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AccountsError::Unauthorized(format!("invalid token: {e}")))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::CreateAccount;
    use crate::service::AccountsConfig;
    use crate::service::test_support::{test_service, test_service_with_config};

    #[test]
    fn issued_token_verifies() {
        let svc = test_service();
        let (user, grant) = svc
            .signup(CreateAccount {
                username: Some("alice".into()),
                email: Some("a@example.com".into()),
                password: Some("pw".into()),
            })
            .unwrap();

        let claims = svc.verify_token(&grant.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = test_service_with_config(AccountsConfig {
            token_ttl: -3600,
            ..Default::default()
        });
        let (_, grant) = svc
            .signup(CreateAccount {
                username: Some("alice".into()),
                email: Some("a@example.com".into()),
                password: Some("pw".into()),
            })
            .unwrap();

        assert!(svc.verify_token(&grant.access_token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let svc = test_service();
        assert!(svc.verify_token("not-a-jwt").is_err());
    }
}
