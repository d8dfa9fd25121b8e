// Record Store Ports (Interfaces)
//
// One narrow capability per operation so callers depend only on what they use.

use crate::domain::{Record, RecordId, UserId, Versioned};
use crate::error::Result;
use async_trait::async_trait;

/// Insert new records
#[async_trait]
pub trait RecordAdder<R: Record>: Send + Sync {
    /// Insert a new record
    ///
    /// Fails with `Duplicate` when a record with the same id exists.
    async fn add(&self, record: &R) -> Result<()>;
}

/// Fetch single records
#[async_trait]
pub trait RecordGetter<R: Record>: Send + Sync {
    /// Fetch the record with `id` owned by `user_id`
    async fn get(&self, user_id: &UserId, id: &RecordId) -> Result<R>;

    /// Fetch by primary key only, without owner scoping
    async fn get_by_id(&self, id: &RecordId) -> Result<R>;
}

/// List records by owner
#[async_trait]
pub trait RecordLister<R: Record>: Send + Sync {
    /// All records owned by `user_id`, in insertion order (empty is not an error)
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<R>>;
}

/// Replace whole records
#[async_trait]
pub trait RecordUpdater<R: Record>: Send + Sync {
    /// Replace the record matching `(id, user_id)` with `record`
    async fn update(&self, record: &R) -> Result<()>;
}

/// Remove records
#[async_trait]
pub trait RecordDeleter<R: Record>: Send + Sync {
    /// Remove the record with `id` owned by `user_id`
    async fn delete(&self, user_id: &UserId, id: &RecordId) -> Result<()>;

    /// Remove by primary key only, without owner scoping
    async fn delete_by_id(&self, id: &RecordId) -> Result<()>;
}

/// Optimistic-concurrency access for read-modify-write use cases
#[async_trait]
pub trait VersionedRecordStore<R: Record>: Send + Sync {
    /// Fetch by primary key together with the current row version
    async fn get_versioned(&self, id: &RecordId) -> Result<Versioned<R>>;

    /// Replace the record only if its stored version equals `expected_version`
    ///
    /// Returns the new version. Fails with `NotFound` if `(id, user_id)` does
    /// not exist and with `Conflict` if it was written since it was read.
    async fn replace_if_version(&self, record: &R, expected_version: i64) -> Result<i64>;
}

/// Full repository over one record kind
pub trait Repository<R: Record>:
    RecordAdder<R>
    + RecordGetter<R>
    + RecordLister<R>
    + RecordUpdater<R>
    + RecordDeleter<R>
    + VersionedRecordStore<R>
{
}

impl<R, T> Repository<R> for T
where
    R: Record,
    T: RecordAdder<R>
        + RecordGetter<R>
        + RecordLister<R>
        + RecordUpdater<R>
        + RecordDeleter<R>
        + VersionedRecordStore<R>,
{
}
