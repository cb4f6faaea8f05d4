mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

async fn create_warehouse(app: &TestApp) -> String {
    let (status, body) = app
        .post(
            "/api/warehouses/create",
            json!({ "name": "Main Warehouse", "address": "12 Dock Road" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body["warehouse"]["warehouseId"]
        .as_str()
        .expect("warehouseId missing")
        .to_string()
}

async fn create_receipt(app: &TestApp, warehouse_id: &str, items: Value) -> String {
    let (status, body) = app
        .post(
            "/api/receipts/create",
            json!({
                "supplierId": "SUP001",
                "warehouseId": warehouse_id,
                "items": items
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Receipt created successfully");
    body["receipt"]["receiptId"]
        .as_str()
        .expect("receiptId missing")
        .to_string()
}

#[tokio::test]
async fn draft_creation_initializes_items() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;

    let id = create_receipt(
        &app,
        &wh,
        json!([
            { "productId": "PR001", "orderedQty": 100 },
            { "productId": "PR002", "orderedQty": 40 }
        ]),
    )
    .await;

    let (status, body) = app.get(&format!("/api/receipts/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    let receipt = &body["receipt"];
    assert_eq!(receipt["status"], "Draft");
    let items = receipt["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["receivedQty"], 0);
        assert!(item.get("locationId").is_none());
    }
}

#[tokio::test]
async fn receiving_accumulates_quantities() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;
    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 5 }])).await;

    let (status, body) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [{ "productId": "PR001", "receivedQty": 3 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Waiting");
    assert_eq!(body["items"][0]["receivedQty"], 3);

    // Second delivery adds to the running total, never overwrites it.
    let (status, body) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [{ "productId": "PR001", "receivedQty": 4 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Ready");
    assert_eq!(body["items"][0]["receivedQty"], 7);
}

#[tokio::test]
async fn ready_requires_every_item_in_the_input() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;
    let id = create_receipt(
        &app,
        &wh,
        json!([
            { "productId": "PR001", "orderedQty": 2 },
            { "productId": "PR002", "orderedQty": 2 }
        ]),
    )
    .await;

    // PR001 fully received, but PR002 absent from the input: not Ready.
    let (status, body) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [{ "productId": "PR001", "receivedQty": 2 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Waiting");

    let (status, body) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [
                { "productId": "PR001", "receivedQty": 0 },
                { "productId": "PR002", "receivedQty": 2 }
            ] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Ready");
}

#[tokio::test]
async fn location_is_kept_once_supplied() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;
    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 10 }])).await;

    let (_, body) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [{ "productId": "PR001", "receivedQty": 4, "locationId": "LC001" }] }),
        )
        .await;
    assert_eq!(body["items"][0]["locationId"], "LC001");

    // A later delivery without a location keeps the earlier one.
    let (_, body) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [{ "productId": "PR001", "receivedQty": 6 }] }),
        )
        .await;
    assert_eq!(body["items"][0]["locationId"], "LC001");
    assert_eq!(body["items"][0]["receivedQty"], 10);
}

#[tokio::test]
async fn validation_creates_stock_and_is_terminal() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;
    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 5 }])).await;

    app.put(
        &format!("/api/receipts/{}/receive", id),
        json!({ "items": [{ "productId": "PR001", "receivedQty": 5, "locationId": "LC001" }] }),
    )
    .await;

    let (status, body) = app
        .post_empty(&format!("/api/receipts/{}/validate", id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Receipt validated and stock updated");
    assert_eq!(body["receiptId"], id.as_str());

    let stocks = app.state.services.stocks.list_stock().await.unwrap();
    assert_eq!(stocks.len(), 1);
    assert_eq!(stocks[0].product_id, "PR001");
    assert_eq!(stocks[0].warehouse_id, wh);
    assert_eq!(stocks[0].location_id.as_deref(), Some("LC001"));
    assert_eq!(stocks[0].quantity, 5);

    let by_id = app
        .state
        .services
        .stocks
        .get_stock(&stocks[0].stock_id)
        .await
        .unwrap()
        .expect("stock record missing");
    assert_eq!(by_id, stocks[0]);

    // Re-validating must fail and must not double-count.
    let (status, body) = app
        .post_empty(&format!("/api/receipts/{}/validate", id))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Receipt already validated");

    let stocks = app.state.services.stocks.list_stock().await.unwrap();
    assert_eq!(stocks.len(), 1);
    assert_eq!(stocks[0].quantity, 5);
}

#[tokio::test]
async fn two_receipts_accumulate_into_one_stock_record() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;

    for _ in 0..2 {
        let id =
            create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 3 }])).await;
        app.put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [{ "productId": "PR001", "receivedQty": 3, "locationId": "LC001" }] }),
        )
        .await;
        let (status, _) = app
            .post_empty(&format!("/api/receipts/{}/validate", id))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let stocks = app.state.services.stocks.list_stock().await.unwrap();
    assert_eq!(stocks.len(), 1);
    assert_eq!(stocks[0].quantity, 6);
}

#[tokio::test]
async fn items_received_without_location_get_a_null_location_record() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;
    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 2 }])).await;

    app.put(
        &format!("/api/receipts/{}/receive", id),
        json!({ "items": [{ "productId": "PR001", "receivedQty": 2 }] }),
    )
    .await;
    app.post_empty(&format!("/api/receipts/{}/validate", id))
        .await;

    let record = app
        .state
        .services
        .stocks
        .find_stock_record("PR001", &wh, None)
        .await
        .unwrap()
        .expect("stock record missing");
    assert_eq!(record.quantity, 2);
    assert_eq!(record.location_id, None);
}

#[tokio::test]
async fn validating_a_draft_flips_it_done_without_stock() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;
    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 5 }])).await;

    let (status, _) = app
        .post_empty(&format!("/api/receipts/{}/validate", id))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/receipts/{}", id)).await;
    assert_eq!(body["receipt"]["status"], "Done");

    let stocks = app.state.services.stocks.list_stock().await.unwrap();
    assert!(stocks.is_empty());
}

#[tokio::test]
async fn cancel_rules() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;

    // Canceling a draft succeeds.
    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 1 }])).await;
    let (status, body) = app
        .post_empty(&format!("/api/receipts/{}/cancel", id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Receipt canceled");
    let (_, body) = app.get(&format!("/api/receipts/{}", id)).await;
    assert_eq!(body["receipt"]["status"], "Canceled");

    // A canceled receipt is terminal for receiving and validation.
    let (status, _) = app
        .put(
            &format!("/api/receipts/{}/receive", id),
            json!({ "items": [{ "productId": "PR001", "receivedQty": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app
        .post_empty(&format!("/api/receipts/{}/validate", id))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Canceling a validated receipt fails.
    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 1 }])).await;
    app.post_empty(&format!("/api/receipts/{}/validate", id))
        .await;
    let (status, body) = app
        .post_empty(&format!("/api/receipts/{}/cancel", id))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot cancel a validated receipt. Use stock adjustment."
    );
}

#[tokio::test]
async fn terminal_receipts_cannot_be_updated() {
    let app = TestApp::new().await;
    let wh = create_warehouse(&app).await;

    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 1 }])).await;
    app.post_empty(&format!("/api/receipts/{}/validate", id))
        .await;

    // An items replacement would reset received quantities on a Done
    // document, so editing stops at the terminal statuses.
    let (status, _) = app
        .put(
            &format!("/api/receipts/{}", id),
            json!({ "items": [{ "productId": "PR002", "orderedQty": 9 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = create_receipt(&app, &wh, json!([{ "productId": "PR001", "orderedQty": 1 }])).await;
    app.post_empty(&format!("/api/receipts/{}/cancel", id))
        .await;
    let (status, _) = app
        .put(
            &format!("/api/receipts/{}", id),
            json!({ "supplierId": "SUP002" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn workflow_errors_on_missing_receipt() {
    let app = TestApp::new().await;

    let (status, body) = app
        .put(
            "/api/receipts/RC999/receive",
            json!({ "items": [{ "productId": "PR001", "receivedQty": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Receipt not found");

    let (status, _) = app.post_empty("/api/receipts/RC999/validate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.post_empty("/api/receipts/RC999/cancel").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
