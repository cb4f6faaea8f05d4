use crate::{
    db::DbPool,
    entities::location::{self, Entity as Location},
    errors::ServiceError,
    services::sequence::{business_key, SequenceService},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::info;

const COUNTER: &str = "location";
const PREFIX: &str = "LC";

pub struct CreateLocationInput {
    pub warehouse_id: String,
    pub name: String,
    pub location_type: String,
}

/// Location store. No referential check is made against the warehouse on
/// create, nor against stock records on delete.
pub struct LocationService {
    db: Arc<DbPool>,
    sequences: SequenceService,
}

impl LocationService {
    pub fn new(db: Arc<DbPool>, sequences: SequenceService) -> Self {
        Self { db, sequences }
    }

    pub async fn create_location(
        &self,
        input: CreateLocationInput,
    ) -> Result<location::Model, ServiceError> {
        let seq = self.sequences.next(COUNTER).await?;
        let location_id = business_key(PREFIX, seq);

        let model = location::ActiveModel {
            location_id: Set(location_id.clone()),
            warehouse_id: Set(input.warehouse_id),
            name: Set(input.name),
            location_type: Set(input.location_type),
            created_at: Set(Utc::now()),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        info!(location_id = %location_id, "location created");
        Ok(model)
    }

    pub async fn list_locations(&self) -> Result<Vec<location::Model>, ServiceError> {
        Location::find()
            .order_by_asc(location::Column::LocationId)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn get_location(&self, id: &str) -> Result<Option<location::Model>, ServiceError> {
        Location::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn delete_location(&self, id: &str) -> Result<(), ServiceError> {
        let result = Location::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Location".into()));
        }

        info!(location_id = %id, "location deleted");
        Ok(())
    }
}
