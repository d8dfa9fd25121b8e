//! RPC Method Handlers
//!
//! Binds each JSON-RPC method to a core service call and maps the outcome
//! to the wire types.

use crate::error::to_rpc_error;
use crate::types::{
    AddFeatureRequest, AddTaskRequest, DeleteResponse, ListRequest, ListResponse,
    RecordKeyRequest, StatusResponse, UpdateFeatureRequest, UpdateTaskRequest, UpvoteRequest,
    UpvoteResponse,
};
use featureboard_core::application::{FeatureService, TaskService, VotingService};
use featureboard_core::domain::{Feature, Task};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use tracing::{error, info};

type RpcResult<T> = Result<T, ErrorObjectOwned>;

/// RPC Handler with injected services
pub struct RpcHandler {
    tasks: Arc<TaskService>,
    features: Arc<FeatureService>,
    voting: Arc<VotingService>,
}

impl RpcHandler {
    pub fn new(
        tasks: Arc<TaskService>,
        features: Arc<FeatureService>,
        voting: Arc<VotingService>,
    ) -> Self {
        Self {
            tasks,
            features,
            voting,
        }
    }

    /// admin.status.v1
    pub async fn status(&self) -> RpcResult<StatusResponse> {
        Ok(StatusResponse {
            status: "I'm Alive!!!".to_string(),
            version: featureboard_core::VERSION.to_string(),
        })
    }

    /// task.add.v1
    pub async fn add_task(&self, params: AddTaskRequest) -> RpcResult<Task> {
        let mut task = Task::new(
            self.tasks.next_id(params.id),
            params.user_id,
            params.name,
            params.description,
        );
        task.completed = params.completed;

        self.tasks.add(task).await.map_err(log_and_convert)
    }

    /// task.get.v1
    pub async fn get_task(&self, params: RecordKeyRequest) -> RpcResult<Task> {
        self.tasks
            .get(&params.user_id, &params.id)
            .await
            .map_err(log_and_convert)
    }

    /// task.list.v1
    pub async fn list_tasks(&self, params: ListRequest) -> RpcResult<ListResponse<Task>> {
        let records = self
            .tasks
            .get_all(&params.user_id)
            .await
            .map_err(log_and_convert)?;
        Ok(ListResponse { records })
    }

    /// task.update.v1
    pub async fn update_task(&self, params: UpdateTaskRequest) -> RpcResult<Task> {
        let task = Task {
            id: params.id,
            user_id: params.user_id,
            name: params.name,
            description: params.description,
            completed: params.completed,
        };

        self.tasks.update(task).await.map_err(log_and_convert)
    }

    /// task.delete.v1
    pub async fn delete_task(&self, params: RecordKeyRequest) -> RpcResult<DeleteResponse> {
        self.tasks
            .delete(&params.user_id, &params.id)
            .await
            .map_err(log_and_convert)?;
        Ok(DeleteResponse {
            id: params.id,
            deleted: true,
        })
    }

    /// feature.add.v1 - new features always start with no votes
    pub async fn add_feature(&self, params: AddFeatureRequest) -> RpcResult<Feature> {
        let feature = Feature::new(
            self.features.next_id(params.id),
            params.user_id,
            params.name,
            params.description,
        );

        self.features.add(feature).await.map_err(log_and_convert)
    }

    /// feature.get.v1
    pub async fn get_feature(&self, params: RecordKeyRequest) -> RpcResult<Feature> {
        self.features
            .get(&params.user_id, &params.id)
            .await
            .map_err(log_and_convert)
    }

    /// feature.list.v1
    pub async fn list_features(&self, params: ListRequest) -> RpcResult<ListResponse<Feature>> {
        let records = self
            .features
            .get_all(&params.user_id)
            .await
            .map_err(log_and_convert)?;
        Ok(ListResponse { records })
    }

    /// feature.update.v1
    pub async fn update_feature(&self, params: UpdateFeatureRequest) -> RpcResult<Feature> {
        self.features
            .update_details(&params.user_id, &params.id, params.name, params.description)
            .await
            .map_err(log_and_convert)
    }

    /// feature.delete.v1
    pub async fn delete_feature(&self, params: RecordKeyRequest) -> RpcResult<DeleteResponse> {
        self.features
            .delete(&params.user_id, &params.id)
            .await
            .map_err(log_and_convert)?;
        Ok(DeleteResponse {
            id: params.id,
            deleted: true,
        })
    }

    /// feature.upvote.v1
    pub async fn upvote(&self, params: UpvoteRequest) -> RpcResult<UpvoteResponse> {
        let outcome = self
            .voting
            .upvote(params.user_id, params.feature_id)
            .await
            .map_err(log_and_convert)?;

        info!(
            feature_id = %outcome.feature_id,
            votes = outcome.vote_count,
            "Upvote accepted via RPC"
        );
        Ok(UpvoteResponse {
            feature_id: outcome.feature_id,
            vote_count: outcome.vote_count,
        })
    }
}

fn log_and_convert(err: featureboard_core::AppError) -> ErrorObjectOwned {
    if err.kind() == featureboard_core::ErrorKind::Internal {
        error!(error = %err, "RPC call failed");
    }
    to_rpc_error(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code;
    use featureboard_core::testing::{InMemoryRecordStore, SequentialIdProvider};
    use uuid::Uuid;

    fn handler() -> RpcHandler {
        let ids = Arc::new(SequentialIdProvider::new());
        let task_store = Arc::new(InMemoryRecordStore::<Task>::new());
        let feature_store = Arc::new(InMemoryRecordStore::<Feature>::new());

        let tasks: TaskService = TaskService::new(task_store, ids.clone());
        let features: FeatureService = FeatureService::new(feature_store.clone(), ids);
        let voting = VotingService::new(feature_store);

        RpcHandler::new(Arc::new(tasks), Arc::new(features), Arc::new(voting))
    }

    fn add_feature_req(owner: Uuid) -> AddFeatureRequest {
        AddFeatureRequest {
            id: None,
            user_id: owner,
            name: "Dark mode".into(),
            description: "Easier on the eyes".into(),
        }
    }

    #[tokio::test]
    async fn test_status() {
        let status = handler().status().await.unwrap();
        assert_eq!(status.status, "I'm Alive!!!");
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let handler = handler();
        let owner = Uuid::new_v4();

        let task = handler
            .add_task(AddTaskRequest {
                id: None,
                user_id: owner,
                name: "Write docs".into(),
                description: "README".into(),
                completed: false,
            })
            .await
            .unwrap();
        assert_eq!(task.id, Uuid::from_u128(1));

        let updated = handler
            .update_task(UpdateTaskRequest {
                id: task.id,
                user_id: owner,
                name: "Write docs".into(),
                description: "README and guide".into(),
                completed: true,
            })
            .await
            .unwrap();
        assert!(updated.completed);

        let listed = handler
            .list_tasks(ListRequest { user_id: owner })
            .await
            .unwrap();
        assert_eq!(listed.records, vec![updated]);

        let deleted = handler
            .delete_task(RecordKeyRequest {
                user_id: owner,
                id: task.id,
            })
            .await
            .unwrap();
        assert!(deleted.deleted);

        let err = handler
            .get_task(RecordKeyRequest {
                user_id: owner,
                id: task.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_task_with_duplicate_id() {
        let handler = handler();
        let owner = Uuid::new_v4();
        let id = Uuid::new_v4();
        let req = || AddTaskRequest {
            id: Some(id),
            user_id: owner,
            name: "a".into(),
            description: "b".into(),
            completed: false,
        };

        handler.add_task(req()).await.unwrap();
        let err = handler.add_task(req()).await.unwrap_err();
        assert_eq!(err.code(), code::DUPLICATE);
    }

    #[tokio::test]
    async fn test_add_task_rejects_blank_name() {
        let err = handler()
            .add_task(AddTaskRequest {
                id: None,
                user_id: Uuid::new_v4(),
                name: "  ".into(),
                description: "b".into(),
                completed: false,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::VALIDATION_ERROR);
    }

    #[tokio::test]
    async fn test_upvote_codes() {
        let handler = handler();
        let owner = Uuid::new_v4();
        let voter = Uuid::new_v4();
        let feature = handler.add_feature(add_feature_req(owner)).await.unwrap();

        let ok = handler
            .upvote(UpvoteRequest {
                user_id: voter,
                feature_id: feature.id,
            })
            .await
            .unwrap();
        assert_eq!(ok.vote_count, 1);

        let again = handler
            .upvote(UpvoteRequest {
                user_id: voter,
                feature_id: feature.id,
            })
            .await
            .unwrap_err();
        assert_eq!(again.code(), code::DUPLICATE_VOTE);

        let own = handler
            .upvote(UpvoteRequest {
                user_id: owner,
                feature_id: feature.id,
            })
            .await
            .unwrap_err();
        assert_eq!(own.code(), code::SELF_VOTE);

        let missing = handler
            .upvote(UpvoteRequest {
                user_id: voter,
                feature_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        assert_eq!(missing.code(), code::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_feature_keeps_votes() {
        let handler = handler();
        let owner = Uuid::new_v4();
        let voter = Uuid::new_v4();
        let feature = handler.add_feature(add_feature_req(owner)).await.unwrap();
        handler
            .upvote(UpvoteRequest {
                user_id: voter,
                feature_id: feature.id,
            })
            .await
            .unwrap();

        let updated = handler
            .update_feature(UpdateFeatureRequest {
                id: feature.id,
                user_id: owner,
                name: "Dark theme".into(),
                description: "Renamed".into(),
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "Dark theme");
        assert_eq!(updated.votes, vec![voter]);

        let foreign = handler
            .update_feature(UpdateFeatureRequest {
                id: feature.id,
                user_id: voter,
                name: "Hijack".into(),
                description: "x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(foreign.code(), code::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_features_empty() {
        let listed = handler()
            .list_features(ListRequest {
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        assert!(listed.records.is_empty());
    }
}
