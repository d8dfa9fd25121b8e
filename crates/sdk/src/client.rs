//! Feature Board Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    AddFeatureRequest, AddTaskRequest, DeleteResponse, Feature, ListRequest, ListResponse,
    RecordKeyRequest, StatusResponse, Task, UpdateFeatureRequest, UpdateTaskRequest,
    UpvoteRequest, UpvoteResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Feature Board Client
///
/// Typed wrapper over the daemon's JSON-RPC methods. Every request is sent
/// with named parameters.
///
/// # Example
///
/// ```no_run
/// use featureboard_sdk::FeatureBoardClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FeatureBoardClient::connect("http://127.0.0.1:8083").await?;
/// println!("{}", client.status().await?.status);
/// # Ok(())
/// # }
/// ```
pub struct FeatureBoardClient {
    client: HttpClient,
}

impl FeatureBoardClient {
    /// Connect to the daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:8083`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    async fn call<P, T>(&self, method: &str, request: &P) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let params = object_params(request)?;
        let response: T = self.client.request(method, params).await?;
        Ok(response)
    }

    /// Liveness check
    pub async fn status(&self) -> Result<StatusResponse> {
        let response: StatusResponse = self
            .client
            .request("admin.status.v1", rpc_params![])
            .await?;
        Ok(response)
    }

    /// Create a task
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use featureboard_sdk::{AddTaskRequest, FeatureBoardClient};
    /// # use uuid::Uuid;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = FeatureBoardClient::connect("http://127.0.0.1:8083").await?;
    /// let task = client.add_task(AddTaskRequest {
    ///     id: None,
    ///     user_id: Uuid::new_v4(),
    ///     name: "Write release notes".to_string(),
    ///     description: "For 0.2".to_string(),
    ///     completed: false,
    /// }).await?;
    ///
    /// println!("Task ID: {}", task.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add_task(&self, request: AddTaskRequest) -> Result<Task> {
        self.call("task.add.v1", &request).await
    }

    pub async fn get_task(&self, user_id: Uuid, id: Uuid) -> Result<Task> {
        self.call("task.get.v1", &RecordKeyRequest { user_id, id })
            .await
    }

    /// All tasks owned by `user_id`, in insertion order
    pub async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>> {
        let response: ListResponse<Task> =
            self.call("task.list.v1", &ListRequest { user_id }).await?;
        Ok(response.records)
    }

    pub async fn update_task(&self, request: UpdateTaskRequest) -> Result<Task> {
        self.call("task.update.v1", &request).await
    }

    pub async fn delete_task(&self, user_id: Uuid, id: Uuid) -> Result<DeleteResponse> {
        self.call("task.delete.v1", &RecordKeyRequest { user_id, id })
            .await
    }

    pub async fn add_feature(&self, request: AddFeatureRequest) -> Result<Feature> {
        self.call("feature.add.v1", &request).await
    }

    pub async fn get_feature(&self, user_id: Uuid, id: Uuid) -> Result<Feature> {
        self.call("feature.get.v1", &RecordKeyRequest { user_id, id })
            .await
    }

    /// All features owned by `user_id`, in insertion order
    pub async fn list_features(&self, user_id: Uuid) -> Result<Vec<Feature>> {
        let response: ListResponse<Feature> =
            self.call("feature.list.v1", &ListRequest { user_id }).await?;
        Ok(response.records)
    }

    pub async fn update_feature(&self, request: UpdateFeatureRequest) -> Result<Feature> {
        self.call("feature.update.v1", &request).await
    }

    pub async fn delete_feature(&self, user_id: Uuid, id: Uuid) -> Result<DeleteResponse> {
        self.call("feature.delete.v1", &RecordKeyRequest { user_id, id })
            .await
    }

    /// Upvote `feature_id` on behalf of `voter`
    ///
    /// Rejected with [`code::SELF_VOTE`](crate::code::SELF_VOTE) for the
    /// owner and [`code::DUPLICATE_VOTE`](crate::code::DUPLICATE_VOTE) for a
    /// repeat vote.
    pub async fn upvote(&self, voter: Uuid, feature_id: Uuid) -> Result<UpvoteResponse> {
        self.call(
            "feature.upvote.v1",
            &UpvoteRequest {
                user_id: voter,
                feature_id,
            },
        )
        .await
    }
}

/// Turn a request struct into named JSON-RPC params
fn object_params<P: Serialize>(request: &P) -> Result<ObjectParams> {
    let mut params = ObjectParams::new();
    match serde_json::to_value(request)? {
        serde_json::Value::Object(fields) => {
            for (name, value) in fields {
                params.insert(&name, value)?;
            }
            Ok(params)
        }
        other => Err(SdkError::Other(format!(
            "Request must serialize to an object, got {}",
            other
        ))),
    }
}
