//! Credential store: user persistence and password verification

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::{info, warn};

use super::models::{LoginInput, RegisterInput, Role, User};
use super::validators::{LoginValidator, RegistrationValidator};
use crate::common::{generate_user_id, safe_email_log, ApiError, Validator};

pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Register a new user with a hashed password
    ///
    /// The email is normalized to its lowercase-trimmed form before the
    /// duplicate check, so re-registering an existing address in a different
    /// case fails. Emails listed in ADMIN_EMAILS register as admins.
    pub async fn register(
        &self,
        input: RegisterInput,
        admin_emails: &HashSet<String>,
    ) -> Result<User, ApiError> {
        let validation = RegistrationValidator.validate(&input);
        if !validation.is_valid() {
            return Err(ApiError::from(validation));
        }

        let name = input.name.trim().to_string();
        let email = input.email.trim().to_lowercase();
        let password = input.password.trim();

        let existing: Option<User> =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
                .bind(&email)
                .fetch_optional(&self.db)
                .await
                .map_err(ApiError::DatabaseError)?;

        if existing.is_some() {
            warn!(
                email = %safe_email_log(&email),
                "Registration rejected: email already in use"
            );
            return Err(ApiError::DuplicateEmail);
        }

        let role = if admin_emails.contains(&email) {
            Role::Admin
        } else {
            Role::User
        };

        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|_| ApiError::InternalServer("Failed to hash password".to_string()))?;

        let id = generate_user_id();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, is_admin, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&name)
        .bind(&email)
        .bind(&password_hash)
        .bind(role.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                ApiError::DuplicateEmail
            } else {
                ApiError::DatabaseError(e)
            }
        })?;

        info!(
            user_id = %id,
            email = %safe_email_log(&email),
            role = role.as_str(),
            "User registered"
        );

        self.find_by_id(&id).await
    }

    /// Verify credentials and return the matching user
    ///
    /// An unknown email and a wrong password both produce the same
    /// InvalidCredentials error, so callers cannot enumerate accounts.
    pub async fn login(&self, input: LoginInput) -> Result<User, ApiError> {
        let validation = LoginValidator.validate(&input);
        if !validation.is_valid() {
            return Err(ApiError::ValidationError(
                "Please provide email and password".to_string(),
            ));
        }

        let email = input.email.trim().to_lowercase();

        let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(&email)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        let user = match user {
            Some(u) => u,
            None => {
                warn!(
                    email = %safe_email_log(&email),
                    "Login failed: unknown email"
                );
                return Err(ApiError::InvalidCredentials);
            }
        };

        let password_ok = verify(&input.password, &user.password_hash)
            .map_err(|_| ApiError::InternalServer("Failed to verify password".to_string()))?;

        if !password_ok {
            warn!(
                user_id = %user.id,
                email = %safe_email_log(&email),
                "Login failed: wrong password"
            );
            return Err(ApiError::InvalidCredentials);
        }

        info!(
            user_id = %user.id,
            email = %safe_email_log(&email),
            "Login successful"
        );

        Ok(user)
    }

    /// Look up a user by id
    pub async fn find_by_id(&self, id: &str) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
