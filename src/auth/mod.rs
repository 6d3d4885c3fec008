//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Registration and password login
//! - JWT token issuance and verification
//! - AuthedUser / OptionalUser extractors for protected routes
//! - Role-based authorization predicates

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod tokens;
pub mod validators;

#[cfg(test)]
mod tests;

pub use extractors::{AuthedUser, OptionalUser};
pub use models::{Role, User};
pub use routes::auth_routes;
