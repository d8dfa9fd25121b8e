// Upvote Use Case

use crate::application::optimistic::{modify_with_retry, DEFAULT_MAX_ATTEMPTS};
use crate::domain::{Feature, RecordId, UserId};
use crate::error::{AppError, Result};
use crate::port::VersionedRecordStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a committed upvote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpvoteOutcome {
    pub feature_id: RecordId,
    pub vote_count: usize,
}

/// Voting Service
///
/// Each upvote is fetch -> validate -> append -> conditional write. A write
/// that loses a race against another writer is retried from a fresh read, so
/// concurrent votes from different users are never dropped.
pub struct VotingService {
    features: Arc<dyn VersionedRecordStore<Feature>>,
    max_attempts: u32,
}

impl VotingService {
    pub fn new(features: Arc<dyn VersionedRecordStore<Feature>>) -> Self {
        Self {
            features,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Attempts allowed when the feature keeps changing underneath a vote
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Apply one upvote from `voter` to `feature_id`
    ///
    /// # Errors
    ///
    /// * `NotFound` - no feature with that id
    /// * `SelfVote` - `voter` owns the feature
    /// * `DuplicateVote` - `voter` already voted
    /// * `Conflict` - the feature changed on every attempt
    /// * `Internal` - store failure
    pub async fn upvote(&self, voter: UserId, feature_id: RecordId) -> Result<UpvoteOutcome> {
        let result = modify_with_retry(
            self.features.as_ref(),
            &feature_id,
            self.max_attempts,
            |feature: &mut Feature| feature.add_vote(voter).map_err(AppError::from),
        )
        .await;

        match result {
            Ok((_, vote_count)) => {
                info!(
                    feature_id = %feature_id,
                    voter = %voter,
                    vote_count,
                    "Upvote committed"
                );
                Ok(UpvoteOutcome {
                    feature_id,
                    vote_count,
                })
            }
            Err(e) => {
                warn!(feature_id = %feature_id, voter = %voter, error = %e, "Upvote rejected");
                Err(e)
            }
        }
    }
}
