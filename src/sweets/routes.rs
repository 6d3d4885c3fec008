// src/sweets/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the sweets router with catalog and inventory routes
///
/// NOTE: /api/sweets/search must be registered before /api/sweets/:id so the
/// literal segment wins over the parameter.
pub fn sweets_routes() -> Router {
    Router::new()
        .route(
            "/api/sweets",
            get(handlers::list_sweets).post(handlers::create_sweet),
        )
        .route("/api/sweets/search", get(handlers::search_sweets))
        .route(
            "/api/sweets/:id",
            get(handlers::get_sweet_by_id)
                .put(handlers::update_sweet)
                .delete(handlers::delete_sweet),
        )
        // Inventory routes
        .route("/api/sweets/:id/purchase", post(handlers::purchase_sweet))
        .route("/api/sweets/:id/restock", post(handlers::restock_sweet))
}
