//! # Authentication Middleware
//!
//! This module provides the Axum extractor for JWT-based authentication.
//! `CurrentUser` resolves the caller of a request, if there is one:
//!
//! 1.  **No Token Present**: Resolves to no user. Reads return empty results
//!     and generation is refused.
//! 2.  **Valid Token Present**: Resolves to the authenticated user, created on
//!     first sight.
//! 3.  **Invalid/Expired Token Present**: Rejects the request with a `401 Unauthorized`.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::Utc;
use core_access::{get_or_create_user, User};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Represents the claims we expect to find in the JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The subject of the token, which we use as the unique user identifier.
    pub sub: String,
    /// The expiration timestamp.
    pub exp: usize,
    /// The user's database ID (UUID). This is optional and mainly for testing.
    #[serde(default)]
    pub user_id: String,
}

/// An Axum extractor that provides the caller of the request, if any.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    /// The caller's user id, or `None` for anonymous requests.
    pub fn id(&self) -> Option<&str> {
        self.0.as_ref().map(|user| user.id.as_str())
    }
}

/// A custom rejection type for authentication failures.
///
/// This allows the `FromRequestParts` implementation to return a specific
/// HTTP status code and error message, which Axum then turns into a response.
pub struct AuthError(StatusCode, String);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "a-secure-secret-key".to_string())
}

fn unauthorized() -> AuthError {
    AuthError(
        StatusCode::UNAUTHORIZED,
        "Invalid or expired token.".to_string(),
    )
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer_header =
            Option::<TypedHeader<Authorization<Bearer>>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    warn!("Unexpected error during header extraction: {}", e);
                    AuthError(
                        StatusCode::BAD_REQUEST,
                        "Invalid Authorization header format.".to_string(),
                    )
                })?;

        let Some(TypedHeader(Authorization(bearer))) = bearer_header else {
            debug!("No Authorization header found, treating request as anonymous.");
            return Ok(CurrentUser(None));
        };

        info!("Authorization header found, attempting to validate JWT.");
        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_secret(jwt_secret().as_ref()),
            &Validation::default(),
        )
        .map_err(|e| {
            warn!("JWT validation failed: {}", e);
            unauthorized()
        })?;

        let current_timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| {
                AuthError(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "System time is before UNIX EPOCH.".to_string(),
                )
            })?
            .as_secs();

        if token_data.claims.exp < current_timestamp as usize {
            warn!(
                "Token has expired. exp: {}, current: {}",
                token_data.claims.exp, current_timestamp
            );
            return Err(unauthorized());
        }

        // If user_id is provided in the claim, construct the user directly.
        // This is primarily for testing scenarios to inject a specific user.
        let user = if !token_data.claims.user_id.is_empty() {
            User {
                id: token_data.claims.user_id,
                created_at: Utc::now(),
            }
        } else {
            get_or_create_user(&state.sqlite_provider.db, &token_data.claims.sub)
                .await
                .map_err(|e| {
                    // This is an internal error because the DB should be available.
                    error!("Failed to get or create user: {}", e);
                    AuthError(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Could not retrieve user: {e}"),
                    )
                })?
        };

        Ok(CurrentUser(Some(user)))
    }
}
