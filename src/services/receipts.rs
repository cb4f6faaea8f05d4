use crate::{
    db::DbPool,
    entities::receipt::{self, Entity as Receipt, ReceiptItem, ReceiptItems, ReceiptStatus},
    entities::stock,
    errors::ServiceError,
    services::sequence::{business_key, SequenceService},
    services::stocks::find_stock_record_on,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set, TransactionError,
    TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

const COUNTER: &str = "receipt";
const PREFIX: &str = "RC";
const STOCK_COUNTER: &str = "stock";
const STOCK_PREFIX: &str = "ST";

/// An expected line at creation time: what was ordered, nothing received.
pub struct NewReceiptLine {
    pub product_id: String,
    pub ordered_qty: i32,
}

pub struct CreateReceiptInput {
    pub supplier_id: String,
    pub warehouse_id: String,
    pub lines: Vec<NewReceiptLine>,
}

/// One incoming delivery line. Quantities accumulate across calls.
pub struct ReceiveLine {
    pub product_id: String,
    pub received_qty: i32,
    pub location_id: Option<String>,
}

/// Draft editing. Replacing the line list re-initializes received
/// quantities to zero.
#[derive(Default)]
pub struct UpdateReceiptInput {
    pub supplier_id: Option<String>,
    pub warehouse_id: Option<String>,
    pub lines: Option<Vec<NewReceiptLine>>,
}

pub struct ReceiveOutcome {
    pub status: ReceiptStatus,
    pub items: Vec<ReceiptItem>,
}

/// Goods-receipt workflow engine.
///
/// Drives the Draft -> Waiting/Ready -> Done/Canceled state machine and,
/// on validation, converts received quantities into stock increases. The
/// only service with cross-entity side effects: validation runs the stock
/// upserts and the status flip inside one database transaction so a
/// mid-sequence failure cannot leave stock half-updated.
pub struct ReceiptService {
    db: Arc<DbPool>,
    sequences: SequenceService,
}

impl ReceiptService {
    pub fn new(db: Arc<DbPool>, sequences: SequenceService) -> Self {
        Self { db, sequences }
    }

    pub async fn create_receipt(
        &self,
        input: CreateReceiptInput,
    ) -> Result<receipt::Model, ServiceError> {
        let seq = self.sequences.next(COUNTER).await?;
        let receipt_id = business_key(PREFIX, seq);
        let now = Utc::now();

        let items = input
            .lines
            .into_iter()
            .map(|line| ReceiptItem {
                product_id: line.product_id,
                ordered_qty: line.ordered_qty,
                received_qty: 0,
                location_id: None,
            })
            .collect();

        let model = receipt::ActiveModel {
            receipt_id: Set(receipt_id.clone()),
            supplier_id: Set(input.supplier_id),
            warehouse_id: Set(input.warehouse_id),
            status: Set(ReceiptStatus::Draft),
            items: Set(ReceiptItems(items)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        info!(receipt_id = %receipt_id, "receipt created");
        Ok(model)
    }

    pub async fn list_receipts(&self) -> Result<Vec<receipt::Model>, ServiceError> {
        Receipt::find()
            .order_by_asc(receipt::Column::ReceiptId)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn get_receipt(&self, id: &str) -> Result<Option<receipt::Model>, ServiceError> {
        Receipt::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    pub async fn update_receipt(
        &self,
        id: &str,
        updates: UpdateReceiptInput,
    ) -> Result<receipt::Model, ServiceError> {
        let existing = self
            .get_receipt(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Receipt".into()))?;

        if existing.status.is_terminal() {
            return Err(ServiceError::InvalidTransition(format!(
                "Cannot update a {:?} receipt",
                existing.status
            )));
        }

        let mut active = existing.into_active_model();
        if let Some(supplier_id) = updates.supplier_id {
            active.supplier_id = Set(supplier_id);
        }
        if let Some(warehouse_id) = updates.warehouse_id {
            active.warehouse_id = Set(warehouse_id);
        }
        if let Some(lines) = updates.lines {
            let items = lines
                .into_iter()
                .map(|line| ReceiptItem {
                    product_id: line.product_id,
                    ordered_qty: line.ordered_qty,
                    received_qty: 0,
                    location_id: None,
                })
                .collect();
            active.items = Set(ReceiptItems(items));
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        info!(receipt_id = %id, "receipt updated");
        Ok(model)
    }

    pub async fn delete_receipt(&self, id: &str) -> Result<(), ServiceError> {
        let result = Receipt::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound("Receipt".into()));
        }

        info!(receipt_id = %id, "receipt deleted");
        Ok(())
    }

    /// Records incoming goods against a receipt.
    ///
    /// Each line adds to the matching item's running total (quantities
    /// accumulate, never overwrite) and sets the item's location when one
    /// is supplied. The receipt lands on `Ready` only when every item
    /// appeared in the input and every running total covers the ordered
    /// quantity; otherwise it stays `Waiting`.
    pub async fn receive_goods(
        &self,
        id: &str,
        lines: Vec<ReceiveLine>,
    ) -> Result<ReceiveOutcome, ServiceError> {
        let receipt = self
            .get_receipt(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Receipt".into()))?;

        if receipt.status.is_terminal() {
            return Err(ServiceError::InvalidTransition(format!(
                "Cannot receive goods into a {:?} receipt",
                receipt.status
            )));
        }

        // Last entry wins when a product appears twice in the input.
        let mut incoming: HashMap<String, (i32, Option<String>)> = HashMap::new();
        for line in lines {
            incoming.insert(line.product_id, (line.received_qty, line.location_id));
        }

        let mut all_received_or_over = true;
        let mut items = receipt.items.0.clone();
        for item in items.iter_mut() {
            let Some((received_qty, location_id)) = incoming.get(&item.product_id) else {
                // An item absent from the input means the receipt is not
                // fully received, whatever its totals.
                all_received_or_over = false;
                continue;
            };
            item.received_qty += received_qty;
            if let Some(location_id) = location_id {
                item.location_id = Some(location_id.clone());
            }
            if item.received_qty < item.ordered_qty {
                all_received_or_over = false;
            }
        }

        let status = if all_received_or_over {
            ReceiptStatus::Ready
        } else {
            ReceiptStatus::Waiting
        };

        let mut active = receipt.into_active_model();
        active.status = Set(status);
        active.items = Set(ReceiptItems(items.clone()));
        active.updated_at = Set(Utc::now());
        active
            .update(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        info!(receipt_id = %id, status = ?status, "goods received");
        Ok(ReceiveOutcome { status, items })
    }

    /// Finalizes a receipt: every item with a positive received quantity is
    /// turned into a stock increase for the (product, warehouse, location)
    /// triple, then the receipt flips to `Done`. The whole operation runs
    /// in one transaction.
    ///
    /// Validating a `Draft` is allowed; with nothing received it flips to
    /// `Done` without touching stock.
    pub async fn validate_receipt(&self, id: &str) -> Result<(), ServiceError> {
        let receipt_id = id.to_string();
        let sequences = self.sequences.clone();

        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let receipt = Receipt::find_by_id(&receipt_id)
                        .one(txn)
                        .await
                        .map_err(ServiceError::db_error)?
                        .ok_or_else(|| ServiceError::NotFound("Receipt".into()))?;

                    match receipt.status {
                        ReceiptStatus::Done => return Err(ServiceError::AlreadyValidated),
                        ReceiptStatus::Canceled => {
                            return Err(ServiceError::InvalidTransition(
                                "Cannot validate a canceled receipt".into(),
                            ))
                        }
                        _ => {}
                    }

                    let now = Utc::now();
                    for item in &receipt.items.0 {
                        if item.received_qty <= 0 {
                            continue;
                        }

                        let existing = find_stock_record_on(
                            txn,
                            &item.product_id,
                            &receipt.warehouse_id,
                            item.location_id.as_deref(),
                        )
                        .await?;

                        match existing {
                            Some(record) => {
                                let quantity = record.quantity + item.received_qty;
                                let mut active = record.into_active_model();
                                active.quantity = Set(quantity);
                                active.updated_at = Set(now);
                                active.update(txn).await.map_err(ServiceError::db_error)?;
                            }
                            None => {
                                let seq = sequences.next_on(txn, STOCK_COUNTER).await?;
                                stock::ActiveModel {
                                    stock_id: Set(business_key(STOCK_PREFIX, seq)),
                                    product_id: Set(item.product_id.clone()),
                                    warehouse_id: Set(receipt.warehouse_id.clone()),
                                    location_id: Set(item.location_id.clone()),
                                    quantity: Set(item.received_qty),
                                    created_at: Set(now),
                                    updated_at: Set(now),
                                }
                                .insert(txn)
                                .await
                                .map_err(ServiceError::db_error)?;
                            }
                        }
                    }

                    let mut active = receipt.into_active_model();
                    active.status = Set(ReceiptStatus::Done);
                    active.updated_at = Set(now);
                    active.update(txn).await.map_err(ServiceError::db_error)?;

                    Ok(())
                })
            })
            .await
            .map_err(unwrap_txn_err)?;

        info!(receipt_id = %id, "receipt validated and stock updated");
        Ok(())
    }

    /// Cancels a receipt. Validated receipts cannot be canceled; correcting
    /// them is a stock-adjustment concern, not a receipt transition.
    pub async fn cancel_receipt(&self, id: &str) -> Result<(), ServiceError> {
        let receipt = self
            .get_receipt(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Receipt".into()))?;

        if receipt.status == ReceiptStatus::Done {
            return Err(ServiceError::InvalidTransition(
                "Cannot cancel a validated receipt. Use stock adjustment.".into(),
            ));
        }

        let mut active = receipt.into_active_model();
        active.status = Set(ReceiptStatus::Canceled);
        active.updated_at = Set(Utc::now());
        active
            .update(self.db.as_ref())
            .await
            .map_err(ServiceError::db_error)?;

        info!(receipt_id = %id, "receipt canceled");
        Ok(())
    }
}

fn unwrap_txn_err(err: TransactionError<ServiceError>) -> ServiceError {
    match err {
        TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
        TransactionError::Transaction(service_err) => service_err,
    }
}
