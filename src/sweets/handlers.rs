use super::models::{
    CreateSweetRequest, PurchaseRequest, RestockRequest, SweetListResponse, SweetQueryParams,
    SweetResponse, UpdateSweetRequest,
};
use super::services::SweetsService;
use crate::auth::{AuthedUser, OptionalUser};
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

// ============================================================================
// Public Catalog Handlers
// ============================================================================

/// GET /api/sweets - List the whole catalog
pub async fn list_sweets(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    OptionalUser(viewer): OptionalUser,
) -> Result<Json<SweetListResponse>, ApiError> {
    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    let sweets = service.list().await?;

    debug!(
        count = sweets.len(),
        viewer = viewer.as_ref().map(|u| u.id.as_str()).unwrap_or("anonymous"),
        "Catalog listed"
    );

    let sweets: Vec<SweetResponse> = sweets.into_iter().map(SweetResponse::from).collect();

    Ok(Json(SweetListResponse {
        success: true,
        count: sweets.len(),
        sweets,
    }))
}

/// GET /api/sweets/search - Search the catalog by name, category and price range
pub async fn search_sweets(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<SweetQueryParams>,
) -> Result<Json<SweetListResponse>, ApiError> {
    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    let sweets = service.search(&params).await?;
    let sweets: Vec<SweetResponse> = sweets.into_iter().map(SweetResponse::from).collect();

    Ok(Json(SweetListResponse {
        success: true,
        count: sweets.len(),
        sweets,
    }))
}

/// GET /api/sweets/:id - Get a single sweet
pub async fn get_sweet_by_id(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(sweet_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    let sweet = service.get_by_id(&sweet_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "sweet": SweetResponse::from(sweet),
    })))
}

// ============================================================================
// Admin Catalog Handlers
// ============================================================================

/// POST /api/sweets - Create a new sweet (admin only)
pub async fn create_sweet(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateSweetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    user.require_admin()?;

    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    let sweet = service.create(request).await?;

    let resp = serde_json::json!({
        "success": true,
        "message": "Sweet created successfully",
        "sweet": SweetResponse::from(sweet),
    });

    Ok((StatusCode::CREATED, Json(resp)))
}

/// PUT /api/sweets/:id - Update a sweet (admin only)
pub async fn update_sweet(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(sweet_id): Path<String>,
    Json(request): Json<UpdateSweetRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_admin()?;

    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    let sweet = service.update(&sweet_id, request).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Sweet updated successfully",
        "sweet": SweetResponse::from(sweet),
    })))
}

/// DELETE /api/sweets/:id - Delete a sweet (admin only)
pub async fn delete_sweet(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(sweet_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_admin()?;

    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    service.delete(&sweet_id).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Sweet deleted successfully",
    })))
}

// ============================================================================
// Inventory Handlers
// ============================================================================

/// POST /api/sweets/:id/purchase - Purchase a quantity (any authenticated user)
pub async fn purchase_sweet(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(sweet_id): Path<String>,
    request: Option<Json<PurchaseRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    let quantity = request
        .and_then(|Json(r)| r.quantity)
        .unwrap_or(1);

    debug!(
        sweet_id = %sweet_id,
        user_id = %user.id,
        quantity = quantity,
        "Purchase requested"
    );

    let sweet = service.purchase(&sweet_id, quantity).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Purchase successful",
        "sweet": SweetResponse::from(sweet),
    })))
}

/// POST /api/sweets/:id/restock - Restock a quantity (admin only)
pub async fn restock_sweet(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(sweet_id): Path<String>,
    request: Option<Json<RestockRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require_admin()?;

    let app_state = state.read().await.clone();
    let service = SweetsService::new(app_state.db);

    let quantity = request.and_then(|Json(r)| r.quantity);
    let sweet = service.restock(&sweet_id, quantity).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Restocked successfully",
        "sweet": SweetResponse::from(sweet),
    })))
}
