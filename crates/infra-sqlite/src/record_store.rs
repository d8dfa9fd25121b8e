// SQLite Record Store Implementation

use async_trait::async_trait;
use featureboard_core::domain::{Feature, Record, RecordId, Task, UserId, Versioned};
use featureboard_core::error::{AppError, Result};
use featureboard_core::port::{
    RecordAdder, RecordDeleter, RecordGetter, RecordLister, RecordUpdater, VersionedRecordStore,
};
use sqlx::SqlitePool;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, error};

/// Upper bound for a single store round trip
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

// Classify sqlx::Error into the core error taxonomy
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            match db_err.code().as_deref() {
                // SQLITE_CONSTRAINT_PRIMARYKEY / SQLITE_CONSTRAINT_UNIQUE
                Some("1555") | Some("2067") => AppError::Duplicate(db_err.message().to_string()),
                Some("5") => AppError::Internal(format!(
                    "Database locked (SQLITE_BUSY): {}",
                    db_err.message()
                )),
                Some("13") => AppError::Internal(format!("Database full: {}", db_err.message())),
                Some(code) => {
                    AppError::Internal(format!("Database error [{}]: {}", code, db_err.message()))
                }
                None => AppError::Internal(format!("Database error: {}", db_err.message())),
            }
        }
        sqlx::Error::RowNotFound => AppError::NotFound("Row not found".to_string()),
        // Connection, pool, protocol errors
        _ => AppError::Internal(err.to_string()),
    }
}

/// SQL text for one table, built once per store
struct Statements {
    insert: String,
    select_scoped: String,
    select_by_id: String,
    select_by_owner: String,
    replace: String,
    replace_if_version: String,
    version_of: String,
    delete_scoped: String,
    delete_by_id: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            insert: format!(
                "INSERT INTO {table} (id, user_id, document, version) VALUES (?, ?, ?, 1)"
            ),
            select_scoped: format!(
                "SELECT document, version FROM {table} WHERE id = ? AND user_id = ?"
            ),
            select_by_id: format!("SELECT document, version FROM {table} WHERE id = ?"),
            select_by_owner: format!(
                "SELECT document, version FROM {table} WHERE user_id = ? ORDER BY rowid ASC"
            ),
            replace: format!(
                "UPDATE {table} SET document = ?, version = version + 1 \
                 WHERE id = ? AND user_id = ?"
            ),
            replace_if_version: format!(
                "UPDATE {table} SET document = ?, version = version + 1 \
                 WHERE id = ? AND user_id = ? AND version = ? \
                 RETURNING version"
            ),
            version_of: format!("SELECT version FROM {table} WHERE id = ? AND user_id = ?"),
            delete_scoped: format!("DELETE FROM {table} WHERE id = ? AND user_id = ?"),
            delete_by_id: format!("DELETE FROM {table} WHERE id = ?"),
        }
    }
}

/// Stored row: the JSON document plus its version
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    document: String,
    version: i64,
}

impl DocumentRow {
    fn into_versioned<R: Record>(self) -> Result<Versioned<R>> {
        let record = serde_json::from_str(&self.document)?;
        Ok(Versioned {
            record,
            version: self.version,
        })
    }
}

/// SQLite-backed store for one record kind
///
/// The table comes from the record kind (`tasks`, `features`). Every method is
/// one round trip bounded by the operation timeout; on expiry the query future
/// is dropped and `Internal` is returned.
pub struct SqliteRecordStore<R> {
    pool: SqlitePool,
    table: &'static str,
    sql: Statements,
    op_timeout: Duration,
    _record: PhantomData<fn() -> R>,
}

pub type SqliteTaskStore = SqliteRecordStore<Task>;
pub type SqliteFeatureStore = SqliteRecordStore<Feature>;

impl<R: Record> SqliteRecordStore<R> {
    pub fn new(pool: SqlitePool) -> Self {
        let table = R::KIND.collection();
        Self {
            pool,
            table,
            sql: Statements::for_table(table),
            op_timeout: DEFAULT_OPERATION_TIMEOUT,
            _record: PhantomData,
        }
    }

    pub fn with_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    // Run one store round trip under the operation timeout and classify failures
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, sqlx::Error>> + Send,
    {
        let err = match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => map_sqlx_error(e),
            Err(_) => AppError::Internal(format!(
                "{} on {} timed out after {:?}",
                op, self.table, self.op_timeout
            )),
        };

        if matches!(err, AppError::Internal(_)) {
            error!(table = self.table, op, error = %err, "Store operation failed");
        } else {
            debug!(table = self.table, op, error = %err, "Store operation rejected");
        }
        Err(err)
    }

    fn not_found(&self, id: &RecordId) -> AppError {
        AppError::NotFound(format!("{} {} not found", R::KIND, id))
    }

    async fn fetch_one_versioned(
        &self,
        id: &RecordId,
        owner: Option<&UserId>,
    ) -> Result<Versioned<R>> {
        let row: Option<DocumentRow> = match owner {
            Some(user_id) => {
                self.bounded(
                    "get",
                    sqlx::query_as(&self.sql.select_scoped)
                        .bind(id.to_string())
                        .bind(user_id.to_string())
                        .fetch_optional(&self.pool),
                )
                .await?
            }
            None => {
                self.bounded(
                    "get_by_id",
                    sqlx::query_as(&self.sql.select_by_id)
                        .bind(id.to_string())
                        .fetch_optional(&self.pool),
                )
                .await?
            }
        };

        match row {
            Some(row) => row.into_versioned(),
            None => {
                debug!(table = self.table, record_id = %id, "No matching record");
                Err(self.not_found(id))
            }
        }
    }
}

#[async_trait]
impl<R: Record> RecordAdder<R> for SqliteRecordStore<R> {
    async fn add(&self, record: &R) -> Result<()> {
        let document = serde_json::to_string(record)?;

        let result = self
            .bounded(
                "add",
                sqlx::query(&self.sql.insert)
                    .bind(record.id().to_string())
                    .bind(record.user_id().to_string())
                    .bind(document)
                    .execute(&self.pool),
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(AppError::Duplicate(_)) => Err(AppError::Duplicate(format!(
                "{} {} already exists",
                R::KIND,
                record.id()
            ))),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<R: Record> RecordGetter<R> for SqliteRecordStore<R> {
    async fn get(&self, user_id: &UserId, id: &RecordId) -> Result<R> {
        Ok(self.fetch_one_versioned(id, Some(user_id)).await?.record)
    }

    async fn get_by_id(&self, id: &RecordId) -> Result<R> {
        Ok(self.fetch_one_versioned(id, None).await?.record)
    }
}

#[async_trait]
impl<R: Record> RecordLister<R> for SqliteRecordStore<R> {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<R>> {
        let rows: Vec<DocumentRow> = self
            .bounded(
                "get_all",
                sqlx::query_as(&self.sql.select_by_owner)
                    .bind(user_id.to_string())
                    .fetch_all(&self.pool),
            )
            .await?;

        rows.into_iter()
            .map(|row| row.into_versioned().map(|v: Versioned<R>| v.record))
            .collect()
    }
}

#[async_trait]
impl<R: Record> RecordUpdater<R> for SqliteRecordStore<R> {
    async fn update(&self, record: &R) -> Result<()> {
        let document = serde_json::to_string(record)?;

        let result = self
            .bounded(
                "update",
                sqlx::query(&self.sql.replace)
                    .bind(document)
                    .bind(record.id().to_string())
                    .bind(record.user_id().to_string())
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            debug!(table = self.table, record_id = %record.id(), "Update matched no record");
            return Err(self.not_found(&record.id()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> RecordDeleter<R> for SqliteRecordStore<R> {
    async fn delete(&self, user_id: &UserId, id: &RecordId) -> Result<()> {
        let result = self
            .bounded(
                "delete",
                sqlx::query(&self.sql.delete_scoped)
                    .bind(id.to_string())
                    .bind(user_id.to_string())
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            debug!(table = self.table, record_id = %id, "Delete matched no record");
            return Err(self.not_found(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> Result<()> {
        let result = self
            .bounded(
                "delete_by_id",
                sqlx::query(&self.sql.delete_by_id)
                    .bind(id.to_string())
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            debug!(table = self.table, record_id = %id, "Delete matched no record");
            return Err(self.not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> VersionedRecordStore<R> for SqliteRecordStore<R> {
    async fn get_versioned(&self, id: &RecordId) -> Result<Versioned<R>> {
        self.fetch_one_versioned(id, None).await
    }

    async fn replace_if_version(&self, record: &R, expected_version: i64) -> Result<i64> {
        let document = serde_json::to_string(record)?;
        let id = record.id().to_string();
        let user_id = record.user_id().to_string();

        // Conditional write: only lands if nobody wrote since our read
        let new_version: Option<i64> = self
            .bounded(
                "replace_if_version",
                sqlx::query_scalar(&self.sql.replace_if_version)
                    .bind(document)
                    .bind(&id)
                    .bind(&user_id)
                    .bind(expected_version)
                    .fetch_optional(&self.pool),
            )
            .await?;

        if let Some(version) = new_version {
            return Ok(version);
        }

        // Nothing matched: tell a vanished record from a newer version
        let actual: Option<i64> = self
            .bounded(
                "version_of",
                sqlx::query_scalar(&self.sql.version_of)
                    .bind(&id)
                    .bind(&user_id)
                    .fetch_optional(&self.pool),
            )
            .await?;

        match actual {
            None => Err(self.not_found(&record.id())),
            Some(actual) => Err(AppError::Conflict(format!(
                "{} {}: expected version {}, found {}",
                R::KIND,
                id,
                expected_version,
                actual
            ))),
        }
    }
}
