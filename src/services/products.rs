use crate::{
    db::DbPool,
    entities::product::{self, Entity as Product},
    errors::ServiceError,
    services::sequence::{business_key, SequenceService},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};
use std::sync::Arc;
use tracing::info;

const COUNTER: &str = "product";
const PREFIX: &str = "PR";

pub struct CreateProductInput {
    pub name: String,
    pub sku: String,
    pub category_id: Option<String>,
    pub unit: Option<String>,
    pub current_stock: Option<i32>,
    pub reorder_level: Option<i32>,
}

/// Partial update; only supplied fields change.
#[derive(Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category_id: Option<String>,
    pub unit: Option<String>,
    pub current_stock: Option<i32>,
    pub reorder_level: Option<i32>,
}

pub struct ProductService {
    db: Arc<DbPool>,
    sequences: SequenceService,
}

impl ProductService {
    pub fn new(db: Arc<DbPool>, sequences: SequenceService) -> Self {
        Self { db, sequences }
    }

    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let seq = self.sequences.next(COUNTER).await?;
        let product_id = business_key(PREFIX, seq);
        let now = Utc::now();

        let model = product::ActiveModel {
            product_id: Set(product_id.clone()),
            name: Set(input.name),
            sku: Set(input.sku),
            category_id: Set(input.category_id),
            unit: Set(input.unit),
            current_stock: Set(input.current_stock.unwrap_or(0)),
            reorder_level: Set(input.reorder_level.unwrap_or(0)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        info!(product_id = %product_id, "product created");
        Ok(model)
    }

    pub async fn list_products(&self) -> Result<Vec<product::Model>, ServiceError> {
        Product::find()
            .order_by_asc(product::Column::ProductId)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<product::Model>, ServiceError> {
        Product::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn update_product(
        &self,
        id: &str,
        updates: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let existing = self
            .get_product(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product".into()))?;

        let mut active = existing.into_active_model();
        if let Some(name) = updates.name {
            active.name = Set(name);
        }
        if let Some(sku) = updates.sku {
            active.sku = Set(sku);
        }
        if let Some(category_id) = updates.category_id {
            active.category_id = Set(Some(category_id));
        }
        if let Some(unit) = updates.unit {
            active.unit = Set(Some(unit));
        }
        if let Some(current_stock) = updates.current_stock {
            active.current_stock = Set(current_stock);
        }
        if let Some(reorder_level) = updates.reorder_level {
            active.reorder_level = Set(reorder_level);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        info!(product_id = %id, "product updated");
        Ok(model)
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ServiceError> {
        let result = Product::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Product".into()));
        }

        info!(product_id = %id, "product deleted");
        Ok(())
    }
}
