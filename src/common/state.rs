// Application state shared across all modules

use sqlx::SqlitePool;
use std::collections::HashSet;

/// Application state containing the database pool and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_emails: HashSet<String>,
}
