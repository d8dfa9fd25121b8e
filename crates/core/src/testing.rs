//! In-memory test doubles for the record store ports.
//!
//! [`InMemoryRecordStore`] implements every capability trait with the same
//! observable semantics as the SQLite adapter (duplicate detection, owner
//! scoping, row versions), so services can be exercised without a database.

use crate::domain::{Record, RecordId, UserId, Versioned};
use crate::error::{AppError, Result};
use crate::port::{
    IdProvider, RecordAdder, RecordDeleter, RecordGetter, RecordLister, RecordUpdater,
    VersionedRecordStore,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Thread-safe in-memory record store, insertion ordered
pub struct InMemoryRecordStore<R> {
    rows: Mutex<Vec<Versioned<R>>>,
}

impl<R: Record> InMemoryRecordStore<R> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    /// Store a record as-is, bypassing validation and duplicate checks
    pub fn insert_raw(&self, record: R) {
        self.rows.lock().push(Versioned { record, version: 1 });
    }

    /// Current stored state of a record
    pub fn snapshot(&self, id: &RecordId) -> Option<Versioned<R>> {
        self.rows
            .lock()
            .iter()
            .find(|row| row.record.id() == *id)
            .cloned()
    }

    fn not_found(id: &RecordId) -> AppError {
        AppError::NotFound(format!("{} {} not found", R::KIND, id))
    }
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordAdder<R> for InMemoryRecordStore<R> {
    async fn add(&self, record: &R) -> Result<()> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|row| row.record.id() == record.id()) {
            return Err(AppError::Duplicate(format!(
                "{} {} already exists",
                R::KIND,
                record.id()
            )));
        }
        rows.push(Versioned {
            record: record.clone(),
            version: 1,
        });
        Ok(())
    }
}

#[async_trait]
impl<R: Record> RecordGetter<R> for InMemoryRecordStore<R> {
    async fn get(&self, user_id: &UserId, id: &RecordId) -> Result<R> {
        self.rows
            .lock()
            .iter()
            .find(|row| row.record.id() == *id && row.record.user_id() == *user_id)
            .map(|row| row.record.clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn get_by_id(&self, id: &RecordId) -> Result<R> {
        self.snapshot(id)
            .map(|row| row.record)
            .ok_or_else(|| Self::not_found(id))
    }
}

#[async_trait]
impl<R: Record> RecordLister<R> for InMemoryRecordStore<R> {
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<R>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|row| row.record.user_id() == *user_id)
            .map(|row| row.record.clone())
            .collect())
    }
}

#[async_trait]
impl<R: Record> RecordUpdater<R> for InMemoryRecordStore<R> {
    async fn update(&self, record: &R) -> Result<()> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|row| {
                row.record.id() == record.id() && row.record.user_id() == record.user_id()
            })
            .ok_or_else(|| Self::not_found(&record.id()))?;
        row.record = record.clone();
        row.version += 1;
        Ok(())
    }
}

#[async_trait]
impl<R: Record> RecordDeleter<R> for InMemoryRecordStore<R> {
    async fn delete(&self, user_id: &UserId, id: &RecordId) -> Result<()> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|row| !(row.record.id() == *id && row.record.user_id() == *user_id));
        if rows.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &RecordId) -> Result<()> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|row| row.record.id() != *id);
        if rows.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> VersionedRecordStore<R> for InMemoryRecordStore<R> {
    async fn get_versioned(&self, id: &RecordId) -> Result<Versioned<R>> {
        self.snapshot(id).ok_or_else(|| Self::not_found(id))
    }

    async fn replace_if_version(&self, record: &R, expected_version: i64) -> Result<i64> {
        let mut rows = self.rows.lock();
        let row = rows
            .iter_mut()
            .find(|row| {
                row.record.id() == record.id() && row.record.user_id() == record.user_id()
            })
            .ok_or_else(|| Self::not_found(&record.id()))?;

        if row.version != expected_version {
            return Err(AppError::Conflict(format!(
                "{} {}: expected version {}, found {}",
                R::KIND,
                record.id(),
                expected_version,
                row.version
            )));
        }
        row.record = record.clone();
        row.version += 1;
        Ok(row.version)
    }
}

/// Deterministic ids: 00000000-0000-0000-0000-000000000001, ...2, ...
pub struct SequentialIdProvider {
    next: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> RecordId {
        Uuid::from_u128(self.next.fetch_add(1, Ordering::SeqCst) as u128)
    }
}
