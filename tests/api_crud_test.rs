mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn health_reports_database_up() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn category_create_list_get() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/categories/create",
            json!({ "name": "Electronics", "description": "Cables and boards" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category created successfully");
    assert_eq!(body["category"]["categoryId"], "CAT001");
    assert_eq!(body["category"]["name"], "Electronics");

    let (status, body) = app.get("/api/categories/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/categories/CAT001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"]["categoryId"], "CAT001");

    let (status, body) = app.get("/api/categories/CAT999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[tokio::test]
async fn category_create_rejects_empty_name() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/categories/create", json!({ "name": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn location_lifecycle() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/locations/create",
            json!({ "warehouseId": "WH001", "name": "Rack A-1", "type": "rack" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["locationId"], "LC001");
    assert_eq!(body["location"]["type"], "rack");

    let (status, body) = app.get("/api/locations/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locations"].as_array().unwrap().len(), 1);

    let (status, body) = app.delete("/api/locations/LC001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Location deleted successfully");

    let (status, body) = app.get("/api/locations/LC001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Location not found");

    // Deleting twice reports the missing row.
    let (status, _) = app.delete("/api/locations/LC001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn warehouse_create_and_fetch() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/warehouses/create",
            json!({ "name": "North DC", "address": "1 Quay Street", "type": "distribution" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["warehouse"]["warehouseId"], "WH001");
    assert_eq!(body["warehouse"]["type"], "distribution");

    let (status, body) = app.get("/api/warehouses/WH001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["warehouse"]["name"], "North DC");

    let (status, body) = app.get("/api/warehouses/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["warehouses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn product_lifecycle() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/products",
            json!({ "name": "HDMI Cable", "sku": "HDMI-2M", "unit": "pcs" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["productId"], "PR001");
    assert_eq!(body["product"]["sku"], "HDMI-2M");

    let (status, body) = app
        .put("/api/products/PR001", json!({ "name": "HDMI Cable 2m" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated successfully");

    let (status, body) = app.get("/api/products/PR001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], "HDMI Cable 2m");
    assert_eq!(body["product"]["sku"], "HDMI-2M");

    let (status, _) = app.delete("/api/products/PR001").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/products/PR999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn receipt_create_requires_named_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/receipts/create", json!({ "supplierId": "SUP001" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "supplierId, warehouseId and items[] are required"
    );
}

#[tokio::test]
async fn receipt_create_rejects_non_list_items() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/receipts/create",
            json!({
                "supplierId": "SUP001",
                "warehouseId": "WH001",
                "items": "not-a-list"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "items[] is required");
}

#[tokio::test]
async fn receive_requires_items_array() {
    let app = TestApp::new().await;

    let (_, body) = app
        .post(
            "/api/receipts/create",
            json!({
                "supplierId": "SUP001",
                "warehouseId": "WH001",
                "items": [{ "productId": "PR001", "orderedQty": 1 }]
            }),
        )
        .await;
    let id = body["receipt"]["receiptId"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(&format!("/api/receipts/{}/receive", id), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "items[] is required");

    // A non-list value gets the same 400, not an extractor rejection.
    let (status, body) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": 123 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "items[] is required");
}

#[tokio::test]
async fn receipt_update_and_delete() {
    let app = TestApp::new().await;

    let (_, body) = app
        .post(
            "/api/receipts/create",
            json!({
                "supplierId": "SUP001",
                "warehouseId": "WH001",
                "items": [{ "productId": "PR001", "orderedQty": 4 }]
            }),
        )
        .await;
    let id = body["receipt"]["receiptId"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(
            &format!("/api/receipts/{}", id),
            json!({ "supplierId": "SUP002" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Receipt updated successfully");

    let (_, body) = app.get(&format!("/api/receipts/{}", id)).await;
    assert_eq!(body["receipt"]["supplierId"], "SUP002");

    let (status, _) = app.delete(&format!("/api/receipts/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/receipts/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/api/receipts").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["receipts"].as_array().unwrap().is_empty());
}
