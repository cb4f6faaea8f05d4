use super::common::{map_service_error, success_response, validate_input};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::warehouses::CreateWarehouseInput,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouseRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub warehouse_type: Option<String>,
    pub is_active: Option<bool>,
}

async fn create_warehouse(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateWarehouseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let warehouse = state
        .services
        .warehouses
        .create_warehouse(CreateWarehouseInput {
            name: payload.name,
            address: payload.address,
            warehouse_type: payload.warehouse_type,
            is_active: payload.is_active,
        })
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Warehouse created successfully",
        "warehouse": warehouse
    })))
}

async fn get_all_warehouses(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let warehouses = state
        .services
        .warehouses
        .list_warehouses()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "warehouses": warehouses
    })))
}

async fn get_warehouse_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let warehouse = state
        .services
        .warehouses
        .get_warehouse(&id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound("Warehouse not found".to_string()))?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "warehouse": warehouse
    })))
}

/// Creates the router for warehouse endpoints
pub fn warehouse_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(create_warehouse))
        .route("/all", get(get_all_warehouses))
        .route("/:id", get(get_warehouse_by_id))
}
