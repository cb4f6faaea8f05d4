use crate::{
    db::DbPool,
    entities::stock::{self, Entity as Stock},
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

/// Read side of the stock store. Writes happen only inside the receipt
/// validation transaction (see `ReceiptService::validate_receipt`).
pub struct StockService {
    db: Arc<DbPool>,
}

impl StockService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    pub async fn list_stock(&self) -> Result<Vec<stock::Model>, ServiceError> {
        Stock::find()
            .order_by_asc(stock::Column::StockId)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn get_stock(&self, id: &str) -> Result<Option<stock::Model>, ServiceError> {
        Stock::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Looks up the record for a (product, warehouse, location) triple.
    pub async fn find_stock_record(
        &self,
        product_id: &str,
        warehouse_id: &str,
        location_id: Option<&str>,
    ) -> Result<Option<stock::Model>, ServiceError> {
        find_stock_record_on(self.db.as_ref(), product_id, warehouse_id, location_id).await
    }
}

/// Triple lookup against an explicit connection, usable inside a
/// transaction. A `None` location matches only rows with a null location.
pub async fn find_stock_record_on<C: ConnectionTrait>(
    conn: &C,
    product_id: &str,
    warehouse_id: &str,
    location_id: Option<&str>,
) -> Result<Option<stock::Model>, ServiceError> {
    let mut query = Stock::find()
        .filter(stock::Column::ProductId.eq(product_id))
        .filter(stock::Column::WarehouseId.eq(warehouse_id));

    query = match location_id {
        Some(loc) => query.filter(stock::Column::LocationId.eq(loc)),
        None => query.filter(stock::Column::LocationId.is_null()),
    };

    query.one(conn).await.map_err(ServiceError::db_error)
}
