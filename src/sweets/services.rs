use super::models::{CreateSweetRequest, Sweet, SweetQueryParams, UpdateSweetRequest};
use super::validators::SweetValidator;
use crate::common::{generate_sweet_id, ApiError, Validator};
use sqlx::{QueryBuilder, SqlitePool};
use tracing::info;

pub struct SweetsService {
    db: SqlitePool,
}

impl SweetsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    // ============================================================================
    // Catalog CRUD Operations
    // ============================================================================

    /// Get all sweets, newest first
    pub async fn list(&self) -> Result<Vec<Sweet>, ApiError> {
        let sweets = sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity, description, image,
                   created_at, updated_at
            FROM sweets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(sweets)
    }

    /// Search the catalog
    ///
    /// Filters compose: case-insensitive substring on name, exact category,
    /// inclusive price bounds. Absent filters are left out of the query.
    pub async fn search(&self, params: &SweetQueryParams) -> Result<Vec<Sweet>, ApiError> {
        let mut query = QueryBuilder::new(
            "SELECT id, name, category, price, quantity, description, image, \
             created_at, updated_at FROM sweets WHERE 1=1",
        );

        if let Some(name) = &params.name {
            query.push(" AND name LIKE ");
            query.push_bind(format!("%{}%", name));
        }

        if let Some(category) = &params.category {
            query.push(" AND category = ");
            query.push_bind(category.clone());
        }

        if let Some(min_price) = params.min_price {
            query.push(" AND price >= ");
            query.push_bind(min_price);
        }

        if let Some(max_price) = params.max_price {
            query.push(" AND price <= ");
            query.push_bind(max_price);
        }

        query.push(" ORDER BY created_at DESC");

        let sweets = query
            .build_query_as::<Sweet>()
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(sweets)
    }

    /// Get a sweet by ID
    pub async fn get_by_id(&self, sweet_id: &str) -> Result<Sweet, ApiError> {
        sqlx::query_as::<_, Sweet>(
            r#"
            SELECT id, name, category, price, quantity, description, image,
                   created_at, updated_at
            FROM sweets
            WHERE id = ?
            "#,
        )
        .bind(sweet_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Sweet not found".to_string()))
    }

    /// Create a new sweet
    pub async fn create(&self, request: CreateSweetRequest) -> Result<Sweet, ApiError> {
        let validation = SweetValidator.validate(&request);
        if !validation.is_valid() {
            return Err(ApiError::from(validation));
        }

        let sweet_id = generate_sweet_id();
        let now = chrono::Utc::now().to_rfc3339();
        let category = request.category.as_deref().unwrap_or("Other");
        let quantity = request.quantity.unwrap_or(0);

        sqlx::query(
            r#"
            INSERT INTO sweets (id, name, category, price, quantity, description, image,
                                created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sweet_id)
        .bind(request.name.trim())
        .bind(category)
        .bind(request.price)
        .bind(quantity)
        .bind(&request.description)
        .bind(&request.image)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!("Created sweet: {} ({})", request.name.trim(), sweet_id);

        self.get_by_id(&sweet_id).await
    }

    /// Update an existing sweet, applying only the supplied fields
    pub async fn update(
        &self,
        sweet_id: &str,
        request: UpdateSweetRequest,
    ) -> Result<Sweet, ApiError> {
        // Check if sweet exists
        self.get_by_id(sweet_id).await?;

        let validation = SweetValidator.validate(&request);
        if !validation.is_valid() {
            return Err(ApiError::from(validation));
        }

        let now = chrono::Utc::now().to_rfc3339();

        // Build dynamic update query; SQLite's column affinity converts the
        // text-bound numeric params
        let mut updates = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(name) = &request.name {
            updates.push("name = ?");
            params.push(name.trim().to_string());
        }

        if let Some(category) = &request.category {
            updates.push("category = ?");
            params.push(category.clone());
        }

        if let Some(price) = request.price {
            updates.push("price = ?");
            params.push(price.to_string());
        }

        if let Some(quantity) = request.quantity {
            updates.push("quantity = ?");
            params.push(quantity.to_string());
        }

        if let Some(description) = &request.description {
            updates.push("description = ?");
            params.push(description.clone());
        }

        if let Some(image) = &request.image {
            updates.push("image = ?");
            params.push(image.clone());
        }

        if updates.is_empty() {
            return self.get_by_id(sweet_id).await;
        }

        updates.push("updated_at = ?");
        params.push(now);
        params.push(sweet_id.to_string());

        let query = format!("UPDATE sweets SET {} WHERE id = ?", updates.join(", "));

        let mut query_builder = sqlx::query(&query);
        for param in params {
            query_builder = query_builder.bind(param);
        }

        query_builder
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!("Updated sweet: {}", sweet_id);

        self.get_by_id(sweet_id).await
    }

    /// Delete a sweet
    pub async fn delete(&self, sweet_id: &str) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM sweets WHERE id = ?")
            .bind(sweet_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Sweet not found".to_string()));
        }

        info!("Deleted sweet: {}", sweet_id);

        Ok(())
    }

    // ============================================================================
    // Inventory Operations
    // ============================================================================

    /// Purchase: decrement stock if sufficient
    ///
    /// The stock check and the decrement are one conditional UPDATE, so two
    /// concurrent purchases can never take the quantity below zero.
    pub async fn purchase(&self, sweet_id: &str, quantity: i64) -> Result<Sweet, ApiError> {
        if quantity < 1 {
            return Err(ApiError::ValidationError(
                "Purchase quantity must be at least 1".to_string(),
            ));
        }

        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE sweets
            SET quantity = quantity - ?, updated_at = ?
            WHERE id = ? AND quantity >= ?
            "#,
        )
        .bind(quantity)
        .bind(&now)
        .bind(sweet_id)
        .bind(quantity)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            // Either the sweet is missing or the stock ran short; the lookup
            // tells the two apart
            self.get_by_id(sweet_id).await?;
            return Err(ApiError::InsufficientStock);
        }

        let sweet = self.get_by_id(sweet_id).await?;

        info!(
            sweet_id = %sweet_id,
            quantity = quantity,
            remaining = sweet.quantity,
            "Purchase completed"
        );

        Ok(sweet)
    }

    /// Restock: increment stock by a positive amount
    pub async fn restock(&self, sweet_id: &str, quantity: Option<i64>) -> Result<Sweet, ApiError> {
        let quantity = match quantity {
            Some(q) if q > 0 => q,
            _ => {
                return Err(ApiError::ValidationError(
                    "Please provide a valid quantity".to_string(),
                ));
            }
        };

        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE sweets
            SET quantity = quantity + ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(quantity)
        .bind(&now)
        .bind(sweet_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Sweet not found".to_string()));
        }

        let sweet = self.get_by_id(sweet_id).await?;

        info!(
            sweet_id = %sweet_id,
            quantity = quantity,
            total = sweet.quantity,
            "Restock completed"
        );

        Ok(sweet)
    }
}
