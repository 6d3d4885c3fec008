//! # Sweets Module
//!
//! This module handles the product catalog and inventory:
//! - Catalog CRUD operations (admin)
//! - Public listing and search
//! - Purchase (stock decrement) and restock (stock increment)

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::sweets_routes;
