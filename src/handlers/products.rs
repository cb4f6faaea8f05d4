use super::common::{map_service_error, success_response, validate_input};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::products::{CreateProductInput, UpdateProductInput},
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub sku: String,
    pub category_id: Option<String>,
    pub unit: Option<String>,
    pub current_stock: Option<i32>,
    pub reorder_level: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category_id: Option<String>,
    pub unit: Option<String>,
    pub current_stock: Option<i32>,
    pub reorder_level: Option<i32>,
}

/// Create a new product with a generated `PR###` key
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created"),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorResponse),
        (status = 500, description = "Server error", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let product = state
        .services
        .products
        .create_product(CreateProductInput {
            name: payload.name,
            sku: payload.sku,
            category_id: payload.category_id,
            unit: payload.unit,
            current_stock: payload.current_stock,
            reorder_level: payload.reorder_level,
        })
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Product created successfully",
        "product": product
    })))
}

/// List all products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Product list returned"),
        (status = 500, description = "Server error", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_all_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .list_products()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "products": products
    })))
}

/// Get a product by business key (PR001...)
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product business key")),
    responses(
        (status = 200, description = "Product returned"),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get_product(&id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "product": product
    })))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .update_product(
            &id,
            UpdateProductInput {
                name: payload.name,
                sku: payload.sku,
                category_id: payload.category_id,
                unit: payload.unit,
                current_stock: payload.current_stock,
                reorder_level: payload.reorder_level,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Product updated successfully"
    })))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_product(&id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Product deleted successfully"
    })))
}

/// Creates the router for product endpoints
pub fn product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_product))
        .route("/", get(get_all_products))
        .route("/:id", get(get_product_by_id))
        .route("/:id", put(update_product))
        .route("/:id", delete(delete_product))
}
