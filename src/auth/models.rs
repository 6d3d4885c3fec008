//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

/// User roles for authorization decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// User database model
#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_admin: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl User {
    /// Effective role: the legacy is_admin flag is folded into the role, so a
    /// row with role='user' but the flag set still counts as an admin.
    pub fn effective_role(&self) -> Role {
        if self.is_admin != 0 {
            return Role::Admin;
        }
        Role::from_str(&self.role).unwrap_or(Role::User)
    }
}

/// User response shape (never includes the password hash)
#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: &'static str,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub created_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let role = user.effective_role();
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: role.as_str(),
            is_admin: role == Role::Admin,
            created_at: user.created_at.clone(),
        }
    }
}

/// Validated registration input, built by the register handler after the raw
/// body passes type checks
#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}
