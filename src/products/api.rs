//! Product API Endpoints
//! Mission: CRUD handlers behind the auth gate

use crate::auth::models::Claims;
use crate::products::models::{Product, ProductPayload};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use tracing::info;

use crate::api::routes::{ApiError, AppState};

/// Create a product - POST /products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let (name, price) = payload
        .validated()
        .ok_or(ApiError::Validation("Name and price are required"))?;

    let product = state
        .product_store
        .create(&name, price)
        .map_err(|e| ApiError::internal("Failed to create product", e))?;

    info!("Product {} created by {}", product.id, claims.username);

    Ok((StatusCode::CREATED, Json(product)))
}

/// List all products - GET /products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .product_store
        .list_all()
        .map_err(|e| ApiError::internal("Failed to fetch products", e))?;

    Ok(Json(products))
}

/// Overwrite a product - PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, ApiError> {
    // Validation precedes any store mutation
    let (name, price) = payload
        .validated()
        .ok_or(ApiError::Validation("Name and price are required"))?;

    state
        .product_store
        .update_by_id(&id, &name, price)
        .map_err(|e| ApiError::internal("Failed to update product", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Product not found"))
}

/// Delete a product - DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state
        .product_store
        .delete_by_id(&id)
        .map_err(|e| ApiError::internal("Failed to delete product", e))?
        .ok_or(ApiError::NotFound("Product not found"))?;

    info!("Product {} deleted by {}", deleted.id, claims.username);

    Ok(Json(json!({ "message": "Product deleted" })))
}
