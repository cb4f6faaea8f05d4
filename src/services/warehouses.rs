use crate::{
    db::DbPool,
    entities::warehouse::{self, Entity as Warehouse},
    errors::ServiceError,
    services::sequence::{business_key, SequenceService},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::info;

const COUNTER: &str = "warehouse";
const PREFIX: &str = "WH";

pub struct CreateWarehouseInput {
    pub name: String,
    pub address: Option<String>,
    pub warehouse_type: Option<String>,
    pub is_active: Option<bool>,
}

pub struct WarehouseService {
    db: Arc<DbPool>,
    sequences: SequenceService,
}

impl WarehouseService {
    pub fn new(db: Arc<DbPool>, sequences: SequenceService) -> Self {
        Self { db, sequences }
    }

    /// Warehouse keys are generated like every other entity kind; a
    /// client-supplied id is ignored.
    pub async fn create_warehouse(
        &self,
        input: CreateWarehouseInput,
    ) -> Result<warehouse::Model, ServiceError> {
        let seq = self.sequences.next(COUNTER).await?;
        let warehouse_id = business_key(PREFIX, seq);

        let model = warehouse::ActiveModel {
            warehouse_id: Set(warehouse_id.clone()),
            name: Set(input.name),
            address: Set(input.address),
            warehouse_type: Set(input.warehouse_type),
            is_active: Set(input.is_active.unwrap_or(true)),
            created_at: Set(Utc::now()),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        info!(warehouse_id = %warehouse_id, "warehouse created");
        Ok(model)
    }

    pub async fn list_warehouses(&self) -> Result<Vec<warehouse::Model>, ServiceError> {
        Warehouse::find()
            .order_by_asc(warehouse::Column::WarehouseId)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn get_warehouse(&self, id: &str) -> Result<Option<warehouse::Model>, ServiceError> {
        Warehouse::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }
}
