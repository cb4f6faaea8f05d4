use crate::{
    db::DbPool,
    entities::category::{self, Entity as Category},
    errors::ServiceError,
    services::sequence::{business_key, SequenceService},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use std::sync::Arc;
use tracing::info;

const COUNTER: &str = "category";
const PREFIX: &str = "CAT";

pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Category store. Categories are immutable after creation; no update or
/// delete is exposed.
pub struct CategoryService {
    db: Arc<DbPool>,
    sequences: SequenceService,
}

impl CategoryService {
    pub fn new(db: Arc<DbPool>, sequences: SequenceService) -> Self {
        Self { db, sequences }
    }

    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<category::Model, ServiceError> {
        let seq = self.sequences.next(COUNTER).await?;
        let category_id = business_key(PREFIX, seq);

        let model = category::ActiveModel {
            category_id: Set(category_id.clone()),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(Utc::now()),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        info!(category_id = %category_id, "category created");
        Ok(model)
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>, ServiceError> {
        Category::find()
            .order_by_asc(category::Column::CategoryId)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn get_category(&self, id: &str) -> Result<Option<category::Model>, ServiceError> {
        Category::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }
}
