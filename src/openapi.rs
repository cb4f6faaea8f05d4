use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = r#"
Warehouse inventory management API.

Product catalog, categories, warehouses and storage locations, plus the
goods-receipt workflow: draft a receipt against a supplier and warehouse,
record received quantities per item, then validate to convert them into
durable stock increases. Entities are addressed by sequential business
keys (PR001, RC001, ...).

Error responses are `{"message": "..."}` with 400 (invalid input),
404 (not found) or 500 (server error).
"#
    ),
    paths(
        crate::handlers::receipts::create_receipt,
        crate::handlers::receipts::get_all_receipts,
        crate::handlers::receipts::get_receipt_by_id,
        crate::handlers::receipts::receive_goods,
        crate::handlers::receipts::validate_receipt,
        crate::handlers::receipts::cancel_receipt,
        crate::handlers::products::create_product,
        crate::handlers::products::get_all_products,
        crate::handlers::products::get_product_by_id,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::handlers::receipts::CreateReceiptRequest,
        crate::handlers::receipts::ReceiptLineRequest,
        crate::handlers::receipts::UpdateReceiptRequest,
        crate::handlers::receipts::ReceiveGoodsRequest,
        crate::handlers::receipts::ReceiveLineRequest,
        crate::handlers::products::CreateProductRequest,
        crate::handlers::products::UpdateProductRequest,
    )),
    tags(
        (name = "receipts", description = "Goods-receipt workflow"),
        (name = "products", description = "Product catalog")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at /api-docs, serving the document at
/// /api-docs/openapi.json.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
