// Record CRUD Use Cases

use crate::application::optimistic::{modify_with_retry, DEFAULT_MAX_ATTEMPTS};
use crate::domain::{Feature, Record, RecordId, Task, UserId};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, Repository};
use std::sync::Arc;
use tracing::{debug, info};

/// CRUD service over one record kind
///
/// Validates records before they reach the store and generates ids the
/// caller did not supply.
pub struct RecordService<R: Record> {
    repo: Arc<dyn Repository<R>>,
    id_provider: Arc<dyn IdProvider>,
    max_attempts: u32,
}

pub type TaskService = RecordService<Task>;
pub type FeatureService = RecordService<Feature>;

impl<R: Record> RecordService<R> {
    pub fn new(repo: Arc<dyn Repository<R>>, id_provider: Arc<dyn IdProvider>) -> Self {
        Self {
            repo,
            id_provider,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Attempts allowed for conflicting detail edits
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Use the requested id, or generate one
    pub fn next_id(&self, requested: Option<RecordId>) -> RecordId {
        requested.unwrap_or_else(|| self.id_provider.generate_id())
    }

    /// Create a new record
    pub async fn add(&self, record: R) -> Result<R> {
        record.validate()?;
        self.repo.add(&record).await?;

        info!(
            kind = %R::KIND,
            record_id = %record.id(),
            user_id = %record.user_id(),
            "Record added"
        );
        Ok(record)
    }

    pub async fn get(&self, user_id: &UserId, id: &RecordId) -> Result<R> {
        self.repo.get(user_id, id).await
    }

    /// Fetch by primary key without owner scoping
    pub async fn get_by_id(&self, id: &RecordId) -> Result<R> {
        self.repo.get_by_id(id).await
    }

    pub async fn get_all(&self, user_id: &UserId) -> Result<Vec<R>> {
        let records = self.repo.get_all(user_id).await?;
        debug!(kind = %R::KIND, user_id = %user_id, count = records.len(), "Records listed");
        Ok(records)
    }

    /// Replace a whole record
    pub async fn update(&self, record: R) -> Result<R> {
        record.validate()?;
        self.repo.update(&record).await?;

        info!(kind = %R::KIND, record_id = %record.id(), "Record updated");
        Ok(record)
    }

    /// Change name and description, keeping every other field as stored
    pub async fn update_details(
        &self,
        user_id: &UserId,
        id: &RecordId,
        name: String,
        description: String,
    ) -> Result<R> {
        let (record, ()) =
            modify_with_retry(self.repo.as_ref(), id, self.max_attempts, |record: &mut R| {
                // Same answer as an owner-scoped lookup: never reveal foreign records
                if record.user_id() != *user_id {
                    return Err(AppError::NotFound(format!("{} {} not found", R::KIND, id)));
                }
                record.set_details(name.clone(), description.clone());
                record.validate()?;
                Ok(())
            })
            .await?;

        info!(kind = %R::KIND, record_id = %id, "Record details updated");
        Ok(record)
    }

    pub async fn delete(&self, user_id: &UserId, id: &RecordId) -> Result<()> {
        self.repo.delete(user_id, id).await?;
        info!(kind = %R::KIND, record_id = %id, user_id = %user_id, "Record deleted");
        Ok(())
    }

    /// Delete by primary key without owner scoping
    pub async fn delete_by_id(&self, id: &RecordId) -> Result<()> {
        self.repo.delete_by_id(id).await?;
        info!(kind = %R::KIND, record_id = %id, "Record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{InMemoryRecordStore, SequentialIdProvider};
    use uuid::Uuid;

    fn feature_service() -> (FeatureService, Arc<InMemoryRecordStore<Feature>>) {
        let store = Arc::new(InMemoryRecordStore::new());
        let service: FeatureService =
            RecordService::new(store.clone(), Arc::new(SequentialIdProvider::new()));
        (service, store)
    }

    #[tokio::test]
    async fn test_add_then_get_round_trip() {
        let (service, _) = feature_service();
        let owner = Uuid::new_v4();
        let feature = Feature::new(service.next_id(None), owner, "x", "y");

        service.add(feature.clone()).await.unwrap();

        let found = service.get(&owner, &feature.id).await.unwrap();
        assert_eq!(found, feature);
        assert!(found.votes.is_empty());
    }

    #[tokio::test]
    async fn test_next_id_prefers_requested() {
        let (service, _) = feature_service();
        let requested = Uuid::new_v4();

        assert_eq!(service.next_id(Some(requested)), requested);
        assert_ne!(service.next_id(None), service.next_id(None));
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name_without_touching_store() {
        let (service, store) = feature_service();
        let feature = Feature::new(Uuid::new_v4(), Uuid::new_v4(), "  ", "y");

        let err = service.add(feature).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_twice_is_duplicate() {
        let (service, _) = feature_service();
        let feature = Feature::new(Uuid::new_v4(), Uuid::new_v4(), "x", "y");

        service.add(feature.clone()).await.unwrap();
        let err = service.add(feature).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[tokio::test]
    async fn test_missing_keys_are_not_found() {
        let (service, _) = feature_service();
        let (owner, id) = (Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(service.get(&owner, &id).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(service.delete(&owner, &id).await.unwrap_err().kind(), ErrorKind::NotFound);

        let ghost = Feature::new(id, owner, "x", "y");
        assert_eq!(service.update(ghost).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_all_empty_is_ok() {
        let (service, _) = feature_service();
        let records = service.get_all(&Uuid::new_v4()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_update_details_keeps_votes() {
        let (service, store) = feature_service();
        let owner = Uuid::new_v4();
        let voter = Uuid::new_v4();
        let mut feature = Feature::new(Uuid::new_v4(), owner, "x", "y");
        feature.votes.push(voter);
        store.insert_raw(feature.clone());

        let updated = service
            .update_details(&owner, &feature.id, "renamed".into(), "better".into())
            .await
            .unwrap();

        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.votes, vec![voter]);
        assert_eq!(service.get(&owner, &feature.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_details_hides_foreign_records() {
        let (service, _) = feature_service();
        let owner = Uuid::new_v4();
        let feature = Feature::new(Uuid::new_v4(), owner, "x", "y");
        service.add(feature.clone()).await.unwrap();

        let err = service
            .update_details(&Uuid::new_v4(), &feature.id, "a".into(), "b".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(service.get(&owner, &feature.id).await.unwrap().name, "x");
    }

    #[tokio::test]
    async fn test_task_crud() {
        let store = Arc::new(InMemoryRecordStore::<Task>::new());
        let service: TaskService =
            RecordService::new(store, Arc::new(SequentialIdProvider::new()));
        let owner = Uuid::new_v4();

        let mut task = service
            .add(Task::new(service.next_id(None), owner, "done", "exists"))
            .await
            .unwrap();

        task.completed = true;
        service.update(task.clone()).await.unwrap();
        assert!(service.get_by_id(&task.id).await.unwrap().completed);

        service.delete_by_id(&task.id).await.unwrap();
        assert_eq!(
            service.get_by_id(&task.id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
