use crate::{db::DbPool, errors::ServiceError};
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use std::sync::Arc;

/// Renders a sequence number as a business key, e.g. `("PR", 1)` -> `PR001`.
/// Padding is a floor of three digits; larger numbers widen naturally.
pub fn business_key(prefix: &str, seq: i64) -> String {
    format!("{prefix}{seq:03}")
}

/// Monotonic per-name sequence generator backed by the `counters` table.
///
/// Each call reserves a strictly increasing integer with a single atomic
/// upsert; two concurrent callers can never observe the same value. This
/// is the ID source for every generated business key (never a count of
/// existing rows, which reuses numbers after deletes and races under
/// concurrent creates).
#[derive(Clone)]
pub struct SequenceService {
    db: Arc<DbPool>,
}

impl SequenceService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Reserves the next number for `name`, starting from 1 on first use.
    pub async fn next(&self, name: &str) -> Result<i64, ServiceError> {
        next_on(self.db.as_ref(), name).await
    }

    /// As `next`, but against an explicit connection so callers inside a
    /// transaction reserve IDs on that transaction.
    pub async fn next_on<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<i64, ServiceError> {
        next_on(conn, name).await
    }
}

// Issued as one raw statement: the increment and the read must be the
// same database round trip, or two concurrent callers can both observe
// the post-increment value of the other.
async fn next_on<C: ConnectionTrait>(conn: &C, name: &str) -> Result<i64, ServiceError> {
    let backend = conn.get_database_backend();
    let sql = match backend {
        DbBackend::Postgres => {
            "INSERT INTO counters (name, seq) VALUES ($1, 1) \
             ON CONFLICT (name) DO UPDATE SET seq = counters.seq + 1 \
             RETURNING seq"
        }
        _ => {
            "INSERT INTO counters (name, seq) VALUES (?, 1) \
             ON CONFLICT (name) DO UPDATE SET seq = counters.seq + 1 \
             RETURNING seq"
        }
    };

    let row = conn
        .query_one(Statement::from_sql_and_values(
            backend,
            sql,
            vec![name.into()],
        ))
        .await
        .map_err(ServiceError::db_error)?
        .ok_or_else(|| ServiceError::InternalError("sequence upsert returned no row".into()))?;

    row.try_get("", "seq").map_err(ServiceError::db_error)
}

#[cfg(test)]
mod tests {
    use super::business_key;

    #[test]
    fn keys_are_zero_padded_to_three_digits() {
        assert_eq!(business_key("PR", 1), "PR001");
        assert_eq!(business_key("RC", 42), "RC042");
        assert_eq!(business_key("ST", 999), "ST999");
    }

    #[test]
    fn keys_widen_past_three_digits() {
        assert_eq!(business_key("LC", 1000), "LC1000");
        assert_eq!(business_key("CAT", 12345), "CAT12345");
    }
}
