//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results. Field names are
//! camelCase on the wire.

use featureboard_core::domain::{RecordId, UserId};
use serde::{Deserialize, Serialize};

/// task.add.v1
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    /// Generated when absent
    #[serde(default)]
    pub id: Option<RecordId>,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// task.update.v1
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub id: RecordId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

/// feature.add.v1
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFeatureRequest {
    /// Generated when absent
    #[serde(default)]
    pub id: Option<RecordId>,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
}

/// feature.update.v1 - votes are never taken from the caller
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeatureRequest {
    pub id: RecordId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
}

/// *.get.v1 / *.delete.v1
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordKeyRequest {
    pub user_id: UserId,
    pub id: RecordId,
}

/// *.list.v1
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub records: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub id: RecordId,
    pub deleted: bool,
}

/// feature.upvote.v1
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteRequest {
    /// The voter
    pub user_id: UserId,
    pub feature_id: RecordId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteResponse {
    pub feature_id: RecordId,
    pub vote_count: usize,
}

/// admin.status.v1
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}
