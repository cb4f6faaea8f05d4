pub mod categories;
pub mod common;
pub mod health;
pub mod locations;
pub mod products;
pub mod receipts;
pub mod warehouses;

use crate::db::DbPool;
use crate::services::{
    categories::CategoryService, locations::LocationService, products::ProductService,
    receipts::ReceiptService, sequence::SequenceService, stocks::StockService,
    warehouses::WarehouseService,
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub warehouses: Arc<WarehouseService>,
    pub locations: Arc<LocationService>,
    pub products: Arc<ProductService>,
    pub stocks: Arc<StockService>,
    pub receipts: Arc<ReceiptService>,
}

impl AppServices {
    /// Build the service container over one shared connection pool.
    /// All generated business keys flow through the same sequence service.
    pub fn new(db: Arc<DbPool>) -> Self {
        let sequences = SequenceService::new(db.clone());

        Self {
            categories: Arc::new(CategoryService::new(db.clone(), sequences.clone())),
            warehouses: Arc::new(WarehouseService::new(db.clone(), sequences.clone())),
            locations: Arc::new(LocationService::new(db.clone(), sequences.clone())),
            products: Arc::new(ProductService::new(db.clone(), sequences.clone())),
            stocks: Arc::new(StockService::new(db.clone())),
            receipts: Arc::new(ReceiptService::new(db, sequences)),
        }
    }
}
