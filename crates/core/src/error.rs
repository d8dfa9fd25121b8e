// Central Error Type for the Application

use thiserror::Error;

use crate::domain::DomainError;

/// Error kinds visible to callers of the core.
///
/// Every failure leaving the core classifies into exactly one of these;
/// the RPC layer maps them to wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Duplicate,
    NotFound,
    SelfVote,
    DuplicateVote,
    Validation,
    Conflict,
    Internal,
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Domain(DomainError::SelfVote { .. }) => ErrorKind::SelfVote,
            AppError::Domain(DomainError::DuplicateVote { .. }) => ErrorKind::DuplicateVote,
            AppError::Domain(DomainError::Validation(_)) => ErrorKind::Validation,
            AppError::Duplicate(_) => ErrorKind::Duplicate,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Serialization(_) | AppError::Config(_) | AppError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by classifying into Duplicate / NotFound / Internal
