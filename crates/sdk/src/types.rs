//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate (camelCase on the wire).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task as returned by the daemon
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// A feature as returned by the daemon
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub votes: Vec<Uuid>,
}

/// Request to create a task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    /// Leave empty to let the daemon generate one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

/// Full replacement of a task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

/// Request to create a feature
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFeatureRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
}

/// Name/description edit; votes are kept by the daemon
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeatureRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordKeyRequest {
    pub user_id: Uuid,
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub records: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpvoteRequest {
    pub user_id: Uuid,
    pub feature_id: Uuid,
}

/// Response from delete operations
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    pub id: Uuid,
    pub deleted: bool,
}

/// Response from an accepted upvote
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteResponse {
    pub feature_id: Uuid,
    pub vote_count: usize,
}

/// Daemon liveness
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}
