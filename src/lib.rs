//! Stockroom API Library
//!
//! Warehouse inventory management: product catalog, categories,
//! warehouses, storage locations, stock records and the goods-receipt
//! workflow that turns received quantities into stock.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared application state handed to every handler.
///
/// The database handle is opened once at startup and injected here; no
/// module reaches for a global connection.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// All business routes, mounted by the binary under `/api`.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/categories", handlers::categories::category_routes())
        .nest("/locations", handlers::locations::location_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/warehouses", handlers::warehouses::warehouse_routes())
        .nest("/receipts", handlers::receipts::receipt_routes())
}
