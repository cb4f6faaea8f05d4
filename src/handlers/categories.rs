use super::common::{map_service_error, success_response, validate_input};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::categories::CreateCategoryInput,
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
pub struct CreateCategoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .categories
        .create_category(CreateCategoryInput {
            name: payload.name,
            description: payload.description,
        })
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Category created successfully",
        "category": category
    })))
}

async fn get_all_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .services
        .categories
        .list_categories()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "categories": categories
    })))
}

async fn get_category_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .services
        .categories
        .get_category(&id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "category": category
    })))
}

/// Creates the router for category endpoints
pub fn category_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(create_category))
        .route("/all", get(get_all_categories))
        .route("/:id", get(get_category_by_id))
}
