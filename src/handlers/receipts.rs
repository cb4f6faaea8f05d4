use super::common::{map_service_error, success_response};
use crate::{
    errors::ApiError,
    handlers::AppState,
    services::receipts::{
        CreateReceiptInput, NewReceiptLine, ReceiveLine, UpdateReceiptInput,
    },
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// The source API guards these fields explicitly and answers 400 with a
/// named message, so they are optional at the serde level and checked by
/// hand rather than rejected by the extractor. `items` stays raw JSON so
/// a non-array value gets the same 400 as a missing one instead of the
/// extractor's rejection.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptRequest {
    pub supplier_id: Option<String>,
    pub warehouse_id: Option<String>,
    #[schema(value_type = Option<Vec<ReceiptLineRequest>>)]
    pub items: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLineRequest {
    pub product_id: String,
    #[serde(default)]
    pub ordered_qty: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReceiptRequest {
    pub supplier_id: Option<String>,
    pub warehouse_id: Option<String>,
    #[schema(value_type = Option<Vec<ReceiptLineRequest>>)]
    pub items: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveGoodsRequest {
    #[schema(value_type = Option<Vec<ReceiveLineRequest>>)]
    pub items: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveLineRequest {
    /// Lines without a product id are skipped, as in the source API.
    pub product_id: Option<String>,
    #[serde(default)]
    pub received_qty: i32,
    pub location_id: Option<String>,
}

/// Checks that `items` actually is a list and decodes its entries. Both
/// failure shapes answer 400 with the `{"message"}` body.
fn parse_items<T: serde::de::DeserializeOwned>(
    items: serde_json::Value,
) -> Result<Vec<T>, ApiError> {
    let serde_json::Value::Array(entries) = items else {
        return Err(ApiError::BadRequest("items[] is required".to_string()));
    };

    entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value(entry)
                .map_err(|err| ApiError::BadRequest(format!("Invalid items entry: {err}")))
        })
        .collect()
}

/// Create a draft receipt
#[utoipa::path(
    post,
    path = "/api/receipts/create",
    request_body = CreateReceiptRequest,
    responses(
        (status = 200, description = "Draft receipt created"),
        (status = 400, description = "Missing required fields", body = crate::errors::ErrorResponse),
        (status = 500, description = "Server error", body = crate::errors::ErrorResponse)
    ),
    tag = "receipts"
)]
pub async fn create_receipt(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReceiptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(supplier_id), Some(warehouse_id), Some(items)) =
        (payload.supplier_id, payload.warehouse_id, payload.items)
    else {
        return Err(ApiError::BadRequest(
            "supplierId, warehouseId and items[] are required".to_string(),
        ));
    };

    let items: Vec<ReceiptLineRequest> = parse_items(items)?;
    let lines = items
        .into_iter()
        .map(|line| NewReceiptLine {
            product_id: line.product_id,
            ordered_qty: line.ordered_qty,
        })
        .collect();

    let receipt = state
        .services
        .receipts
        .create_receipt(CreateReceiptInput {
            supplier_id,
            warehouse_id,
            lines,
        })
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Receipt created successfully",
        "receipt": receipt
    })))
}

/// List all receipts
#[utoipa::path(
    get,
    path = "/api/receipts",
    responses(
        (status = 200, description = "Receipt list returned"),
        (status = 500, description = "Server error", body = crate::errors::ErrorResponse)
    ),
    tag = "receipts"
)]
pub async fn get_all_receipts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let receipts = state
        .services
        .receipts
        .list_receipts()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "receipts": receipts
    })))
}

/// Get a receipt by business key (RC001...)
#[utoipa::path(
    get,
    path = "/api/receipts/{id}",
    params(("id" = String, Path, description = "Receipt business key")),
    responses(
        (status = 200, description = "Receipt returned"),
        (status = 404, description = "Receipt not found", body = crate::errors::ErrorResponse)
    ),
    tag = "receipts"
)]
pub async fn get_receipt_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let receipt = state
        .services
        .receipts
        .get_receipt(&id)
        .await
        .map_err(map_service_error)?
        .ok_or_else(|| ApiError::NotFound("Receipt not found".to_string()))?;

    Ok(success_response(serde_json::json!({
        "message": "Fetched successfully",
        "receipt": receipt
    })))
}

async fn update_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReceiptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let lines = payload
        .items
        .map(parse_items::<ReceiptLineRequest>)
        .transpose()?
        .map(|items| {
            items
                .into_iter()
                .map(|line| NewReceiptLine {
                    product_id: line.product_id,
                    ordered_qty: line.ordered_qty,
                })
                .collect()
        });

    state
        .services
        .receipts
        .update_receipt(
            &id,
            UpdateReceiptInput {
                supplier_id: payload.supplier_id,
                warehouse_id: payload.warehouse_id,
                lines,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Receipt updated successfully"
    })))
}

async fn delete_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .receipts
        .delete_receipt(&id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Receipt deleted successfully"
    })))
}

/// Record received quantities (and optionally locations) per item
#[utoipa::path(
    put,
    path = "/api/receipts/{id}/receive",
    params(("id" = String, Path, description = "Receipt business key")),
    request_body = ReceiveGoodsRequest,
    responses(
        (status = 200, description = "Received quantities updated"),
        (status = 400, description = "Missing items[] or terminal receipt", body = crate::errors::ErrorResponse),
        (status = 404, description = "Receipt not found", body = crate::errors::ErrorResponse)
    ),
    tag = "receipts"
)]
pub async fn receive_goods(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ReceiveGoodsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(items) = payload.items else {
        return Err(ApiError::BadRequest("items[] is required".to_string()));
    };

    let items: Vec<ReceiveLineRequest> = parse_items(items)?;
    let lines = items
        .into_iter()
        .filter_map(|line| {
            line.product_id.map(|product_id| ReceiveLine {
                product_id,
                received_qty: line.received_qty,
                location_id: line.location_id,
            })
        })
        .collect();

    let outcome = state
        .services
        .receipts
        .receive_goods(&id, lines)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Received quantities updated",
        "status": outcome.status,
        "items": outcome.items
    })))
}

/// Finalize a receipt and convert received quantities into stock
#[utoipa::path(
    post,
    path = "/api/receipts/{id}/validate",
    params(("id" = String, Path, description = "Receipt business key")),
    responses(
        (status = 200, description = "Receipt validated and stock updated"),
        (status = 400, description = "Already validated or canceled", body = crate::errors::ErrorResponse),
        (status = 404, description = "Receipt not found", body = crate::errors::ErrorResponse)
    ),
    tag = "receipts"
)]
pub async fn validate_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .receipts
        .validate_receipt(&id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Receipt validated and stock updated",
        "receiptId": id
    })))
}

/// Cancel a receipt that has not been validated
#[utoipa::path(
    post,
    path = "/api/receipts/{id}/cancel",
    params(("id" = String, Path, description = "Receipt business key")),
    responses(
        (status = 200, description = "Receipt canceled"),
        (status = 400, description = "Receipt already validated", body = crate::errors::ErrorResponse),
        (status = 404, description = "Receipt not found", body = crate::errors::ErrorResponse)
    ),
    tag = "receipts"
)]
pub async fn cancel_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .receipts
        .cancel_receipt(&id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(serde_json::json!({
        "message": "Receipt canceled"
    })))
}

/// Creates the router for receipt endpoints
pub fn receipt_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(create_receipt))
        .route("/", get(get_all_receipts))
        .route(
            "/:id",
            get(get_receipt_by_id).put(update_receipt).delete(delete_receipt),
        )
        .route("/:id/receive", put(receive_goods))
        .route("/:id/validate", post(validate_receipt))
        .route("/:id/cancel", post(cancel_receipt))
}
