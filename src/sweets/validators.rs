// src/sweets/validators.rs

use super::models::{CreateSweetRequest, UpdateSweetRequest, CATEGORIES};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Sweet Validators
// ============================================================================

pub struct SweetValidator;

impl Validator<CreateSweetRequest> for SweetValidator {
    fn validate(&self, data: &CreateSweetRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        validate_name(&mut result, &data.name);

        if let Some(category) = &data.category {
            validate_category(&mut result, category);
        }

        validate_price(&mut result, data.price);

        if let Some(quantity) = data.quantity {
            validate_quantity(&mut result, quantity);
        }

        if let Some(description) = &data.description {
            validate_description(&mut result, description);
        }

        result
    }
}

impl Validator<UpdateSweetRequest> for SweetValidator {
    fn validate(&self, data: &UpdateSweetRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(name) = &data.name {
            validate_name(&mut result, name);
        }

        if let Some(category) = &data.category {
            validate_category(&mut result, category);
        }

        if let Some(price) = data.price {
            validate_price(&mut result, price);
        }

        if let Some(quantity) = data.quantity {
            validate_quantity(&mut result, quantity);
        }

        if let Some(description) = &data.description {
            validate_description(&mut result, description);
        }

        result
    }
}

// ============================================================================
// Field Rules
// ============================================================================

fn validate_name(result: &mut ValidationResult, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        result.add_error("name", "Sweet name is required");
    } else if name.chars().count() < 2 {
        result.add_error("name", "Sweet name must be at least 2 characters");
    } else if name.chars().count() > 100 {
        result.add_error("name", "Sweet name cannot exceed 100 characters");
    }
}

fn validate_category(result: &mut ValidationResult, category: &str) {
    if !CATEGORIES.contains(&category) {
        result.add_error("category", "Invalid category");
    }
}

fn validate_price(result: &mut ValidationResult, price: f64) {
    if !price.is_finite() || price < 0.0 {
        result.add_error("price", "Price cannot be negative");
    }
}

fn validate_quantity(result: &mut ValidationResult, quantity: i64) {
    if quantity < 0 {
        result.add_error("quantity", "Quantity cannot be negative");
    }
}

fn validate_description(result: &mut ValidationResult, description: &str) {
    if description.chars().count() > 500 {
        result.add_error("description", "Description cannot exceed 500 characters");
    }
}
