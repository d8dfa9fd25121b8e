// Domain Error Types

use thiserror::Error;

use crate::domain::{RecordId, UserId};

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User {voter} cannot vote for their own feature {feature}")]
    SelfVote { voter: UserId, feature: RecordId },

    #[error("User {voter} has already voted for feature {feature}")]
    DuplicateVote { voter: UserId, feature: RecordId },

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
