//! Authentication handlers

use axum::extract::{Extension, Json};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::extractors::AuthedUser;
use super::models::{LoginInput, RegisterInput, UserResponse};
use super::services::UserService;
use super::tokens;
use crate::common::{ApiError, AppState};

/// POST /api/auth/register
/// Creates a new account and returns a token for it
///
/// # Request Body
/// ```json
/// { "name": "...", "email": "...", "password": "..." }
/// ```
pub async fn register(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    let input = RegisterInput {
        name: required_string_field(&body, "name")?,
        email: required_string_field(&body, "email")?,
        password: required_string_field(&body, "password")?,
    };

    let service = UserService::new(state.db.clone());
    let user = service.register(input, &state.admin_emails).await?;

    let token = tokens::issue(&user, &state.jwt_secret, state.jwt_ttl_hours)?;

    let resp = serde_json::json!({
        "success": true,
        "message": "User registered successfully",
        "token": token,
        "user": UserResponse::from(&user),
    });

    Ok((StatusCode::CREATED, Json(resp)))
}

/// POST /api/auth/login
/// Verifies credentials and returns a fresh token
pub async fn login(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let email = optional_string_field(&body, "email");
    let password = optional_string_field(&body, "password");

    let (email, password) = match (email, password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(ApiError::ValidationError(
                "Please provide email and password".to_string(),
            ));
        }
    };

    let service = UserService::new(state.db.clone());
    let user = service.login(LoginInput { email, password }).await?;

    let token = tokens::issue(&user, &state.jwt_secret, state.jwt_ttl_hours)?;

    let resp = serde_json::json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "user": UserResponse::from(&user),
    });

    Ok(Json(resp))
}

/// GET /api/auth/me
/// Returns the current authenticated user's information
pub async fn me(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let service = UserService::new(state.db.clone());
    let user = service.find_by_id(&authed.id).await?;

    debug!(user_id = %user.id, "Returning current user profile");

    let resp = serde_json::json!({
        "success": true,
        "user": UserResponse::from(&user),
    });

    Ok(Json(resp))
}

// ---- Helper Functions ----

/// Pull a required string field out of the raw request body, distinguishing
/// an absent field from one of the wrong type
fn required_string_field(body: &serde_json::Value, field: &str) -> Result<String, ApiError> {
    let value = match body.get(field) {
        Some(v) if !v.is_null() => v,
        _ => {
            return Err(ApiError::ValidationError(
                "Please provide name, email, and password. All fields are required.".to_string(),
            ));
        }
    };

    let value = value.as_str().ok_or_else(|| {
        ApiError::ValidationError("Invalid data types. All fields must be strings.".to_string())
    })?;

    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "Please provide name, email, and password. All fields are required.".to_string(),
        ));
    }

    Ok(value.to_string())
}

fn optional_string_field(body: &serde_json::Value, field: &str) -> Option<String> {
    body.get(field).and_then(|v| v.as_str()).map(str::to_string)
}
