// src/sweets/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Allowed catalog categories
pub const CATEGORIES: [&str; 8] = [
    "Chocolates",
    "Candies",
    "Cookies",
    "Cakes",
    "Ice Cream",
    "Desserts",
    "Traditional",
    "Other",
];

// ============================================================================
// Sweet Models
// ============================================================================

#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Sweet {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Sweet response with the derived in_stock flag
#[derive(Serialize, Debug)]
pub struct SweetResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Sweet> for SweetResponse {
    fn from(sweet: Sweet) -> Self {
        SweetResponse {
            id: sweet.id,
            name: sweet.name,
            category: sweet.category,
            price: sweet.price,
            in_stock: sweet.quantity > 0,
            quantity: sweet.quantity,
            description: sweet.description,
            image: sweet.image,
            created_at: sweet.created_at,
            updated_at: sweet.updated_at,
        }
    }
}

/// Catalog listing response
#[derive(Serialize, Debug)]
pub struct SweetListResponse {
    pub success: bool,
    pub count: usize,
    pub sweets: Vec<SweetResponse>,
}

// ============================================================================
// Request Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSweetRequest {
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Partial update: only supplied fields are applied, absent fields are never
/// overwritten
#[derive(Debug, Deserialize, Default)]
pub struct UpdateSweetRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Search filters; absent filters are simply omitted from the query
#[derive(Debug, Deserialize, Default)]
pub struct SweetQueryParams {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(alias = "maxPrice")]
    pub max_price: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PurchaseRequest {
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RestockRequest {
    pub quantity: Option<i64>,
}
