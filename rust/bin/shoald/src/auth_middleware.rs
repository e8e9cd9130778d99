//! JWT authentication middleware.
//!
//! Extracts JWT from `Authorization: Bearer <token>`, validates it,
//! and provides `Claims` to downstream handlers via request extensions.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{DecodingKey, Validation};

use shoal_core::Claims;

/// Shared JWT configuration for the middleware.
#[derive(Clone)]
pub struct JwtState {
    pub decoding_key: DecodingKey,
    pub validation: Validation,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "missing authorization token".to_string(),
            ),
            AuthError::InvalidToken(e) => {
                (StatusCode::UNAUTHORIZED, format!("invalid token: {}", e))
            }
        };
        let body = serde_json::json!({ "error": msg });
        (status, axum::Json(body)).into_response()
    }
}

/// Middleware that extracts and validates JWT from the Authorization header.
///
/// If the request path is in the public list, the middleware passes through.
/// Otherwise, it requires a valid JWT and stores Claims in request extensions.
pub async fn auth_middleware(
    State(jwt_state): State<Arc<JwtState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path().to_string();

    // Public endpoints that don't require authentication.
    if is_public_path(&path) {
        return Ok(next.run(request).await);
    }

    // Extract Bearer token.
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    // Validate and decode JWT.
    let token_data =
        jsonwebtoken::decode::<Claims>(token, &jwt_state.decoding_key, &jwt_state.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    // Store claims in request extensions for handlers to access.
    request.extensions_mut().insert(token_data.claims);

    Ok(next.run(request).await)
}

/// Check if a request path is public (no auth required).
fn is_public_path(path: &str) -> bool {
    matches!(path, "/health" | "/version")
        || path.starts_with("/accounts/signup")
        || path.starts_with("/accounts/login")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_paths() {
        assert!(is_public_path("/health"));
        assert!(is_public_path("/version"));
        assert!(is_public_path("/accounts/signup"));
        assert!(is_public_path("/accounts/login"));
    }

    #[test]
    fn protected_paths() {
        assert!(!is_public_path("/follow"));
        assert!(!is_public_path("/follow/requests"));
        assert!(!is_public_path("/accounts/users/u1"));
        assert!(!is_public_path("/feed/posts"));
    }
}
