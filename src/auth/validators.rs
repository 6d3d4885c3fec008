// src/auth/validators.rs

use super::models::{LoginInput, RegisterInput};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Registration Validators
// ============================================================================

pub struct RegistrationValidator;

impl Validator<RegisterInput> for RegistrationValidator {
    fn validate(&self, data: &RegisterInput) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Name is required");
        } else if data.name.trim().len() > 255 {
            result.add_error("name", "Name must be less than 255 characters");
        }

        let email = data.email.trim();
        if email.is_empty() {
            result.add_error("email", "Email is required");
        } else if !is_plausible_email(email) {
            result.add_error("email", "Please provide a valid email address");
        }

        if data.password.trim().is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}

// ============================================================================
// Login Validators
// ============================================================================

pub struct LoginValidator;

impl Validator<LoginInput> for LoginValidator {
    fn validate(&self, data: &LoginInput) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        }

        if data.password.is_empty() {
            result.add_error("password", "Password is required");
        }

        result
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Minimal shape check: one '@' with non-empty local part and a dotted domain
fn is_plausible_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
