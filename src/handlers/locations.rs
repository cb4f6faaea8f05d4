use super::common::{map_service_error, success_response, validate_input};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::locations::CreateLocationInput,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[validate(length(min = 1))]
    pub warehouse_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// rack, shelf, bin or floor
    #[serde(rename = "type")]
    pub location_type: String,
}

async fn create_location(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let location = state
        .services
        .locations
        .create_location(CreateLocationInput {
            warehouse_id: payload.warehouse_id,
            name: payload.name,
            location_type: payload.location_type,
        })
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Location created successfully",
        "location": location
    })))
}

async fn get_all_locations(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let locations = state
        .services
        .locations
        .list_locations()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "locations": locations
    })))
}

async fn get_location_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let location = state
        .services
        .locations
        .get_location(&id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound("Location not found".to_string()))?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "location": location
    })))
}

async fn delete_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .locations
        .delete_location(&id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Location deleted successfully"
    })))
}

/// Creates the router for location endpoints
pub fn location_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(create_location))
        .route("/all", get(get_all_locations))
        .route("/:id", get(get_location_by_id))
        .route("/:id", delete(delete_location))
}
