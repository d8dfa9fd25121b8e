//! Feature Board SDK - Rust Client Library
//!
//! Provides a typed client for the Feature Board daemon.
//!
//! # Example
//!
//! ```no_run
//! use featureboard_sdk::{AddFeatureRequest, FeatureBoardClient};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeatureBoardClient::connect("http://127.0.0.1:8083").await?;
//!
//!     let owner = Uuid::new_v4();
//!     let feature = client.add_feature(AddFeatureRequest {
//!         id: None,
//!         user_id: owner,
//!         name: "Dark mode".to_string(),
//!         description: "Easier on the eyes".to_string(),
//!     }).await?;
//!
//!     let vote = client.upvote(Uuid::new_v4(), feature.id).await?;
//!     println!("{} now has {} votes", vote.feature_id, vote.vote_count);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::FeatureBoardClient;
pub use error::{code, Result, SdkError};
pub use types::{
    AddFeatureRequest, AddTaskRequest, DeleteResponse, Feature, StatusResponse, Task,
    UpdateFeatureRequest, UpdateTaskRequest, UpvoteResponse,
};
