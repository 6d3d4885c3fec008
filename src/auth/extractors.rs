//! Authentication and authorization extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::{Role, User};
use super::tokens;
use crate::common::{safe_email_log, ApiError, AppState};

/// Authenticated user extractor
///
/// Validates the bearer token from the Authorization header and resolves it
/// to a user record. Rejects with 401 when the header is missing, the token
/// fails verification, or the user no longer exists.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admit admins only
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            return Ok(());
        }
        warn!(
            user_id = %self.id,
            "Authorization failed: admin privileges required"
        );
        Err(ApiError::Forbidden(
            "Access denied. Admin privileges required.".to_string(),
        ))
    }

    /// Admit any of the listed roles
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        let roles: Vec<&str> = allowed.iter().map(Role::as_str).collect();
        Err(ApiError::Forbidden(format!(
            "Access denied. Required role: {}",
            roles.join(" or ")
        )))
    }

    /// Admins pass unconditionally; everyone else must own the resource
    pub fn require_owner_or_admin(&self, owner_id: &str) -> Result<(), ApiError> {
        if self.is_admin() || self.id == owner_id {
            return Ok(());
        }
        Err(ApiError::Forbidden(
            "Access denied. You can only access your own resources.".to_string(),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let app_state = state_lock.read().await.clone();

        // Extract the bearer token from the Authorization header
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(tokens::extract_bearer);

        let token = match token {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing or malformed Authorization header");
                return Err(ApiError::Unauthorized(
                    "Authentication required. Please provide a valid token.".to_string(),
                ));
            }
        };

        let claims = tokens::verify(token, &app_state.jwt_secret).map_err(|e| {
            warn!(error = %e, "Token verification failed");
            ApiError::from(e)
        })?;

        // The token may outlive the account; re-check the user exists
        let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(&claims.sub)
            .fetch_optional(&app_state.db)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    user_id = %claims.sub,
                    "Database error during user lookup in authentication"
                );
                ApiError::DatabaseError(e)
            })?;

        match user {
            Some(u) => {
                let role = u.effective_role();
                debug!(
                    user_id = %u.id,
                    email = %safe_email_log(&u.email),
                    role = role.as_str(),
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser {
                    id: u.id,
                    name: u.name,
                    email: u.email,
                    role,
                })
            }
            None => {
                warn!(user_id = %claims.sub, "Authentication failed: user not found in database");
                Err(ApiError::Unauthorized(
                    "User not found. Token is invalid.".to_string(),
                ))
            }
        }
    }
}

/// Optional authentication extractor
///
/// Runs the same extraction and verification as [`AuthedUser`], but any
/// failure degrades to an anonymous request instead of rejecting it.
#[derive(Debug)]
pub struct OptionalUser(pub Option<AuthedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AuthedUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalUser(Some(user))),
            Err(e) => {
                debug!(error = %e, "Optional authentication failed, continuing anonymously");
                Ok(OptionalUser(None))
            }
        }
    }
}
