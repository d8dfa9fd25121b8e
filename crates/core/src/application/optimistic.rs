// Optimistic read-modify-write over a versioned record store

use crate::domain::{Record, RecordId};
use crate::error::{AppError, Result};
use crate::port::VersionedRecordStore;
use tracing::debug;

/// Default number of read-modify-write attempts before giving up with `Conflict`
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Read a record, apply `mutate`, and write it back only if nobody else wrote
/// it in between.
///
/// On a version conflict the whole cycle restarts from a fresh read, so
/// `mutate` always sees the latest stored state. An error from `mutate` aborts
/// immediately without writing.
///
/// Returns the persisted record and whatever `mutate` returned.
pub async fn modify_with_retry<R, S, T, F>(
    store: &S,
    id: &RecordId,
    max_attempts: u32,
    mut mutate: F,
) -> Result<(R, T)>
where
    R: Record,
    S: VersionedRecordStore<R> + ?Sized,
    F: FnMut(&mut R) -> Result<T> + Send,
    T: Send,
{
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        let current = store.get_versioned(id).await?;
        let mut record = current.record;
        let output = mutate(&mut record)?;

        match store.replace_if_version(&record, current.version).await {
            Ok(_) => return Ok((record, output)),
            Err(AppError::Conflict(reason)) => {
                debug!(
                    kind = %R::KIND,
                    record_id = %id,
                    attempt,
                    max_attempts,
                    reason = %reason,
                    "Version conflict, retrying"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::Conflict(format!(
        "{} {} kept changing after {} attempts",
        R::KIND,
        id,
        max_attempts
    )))
}
