// Record abstraction shared by Task and Feature

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::error::{DomainError, Result};

/// Record ID (UUID, primary key)
pub type RecordId = Uuid;

/// Owning user ID
pub type UserId = Uuid;

/// Record kinds persisted by the store, one collection each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Task,
    Feature,
}

impl RecordKind {
    /// Collection (table) name holding records of this kind
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Task => "tasks",
            RecordKind::Feature => "features",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Task => write!(f, "task"),
            RecordKind::Feature => write!(f, "feature"),
        }
    }
}

/// A user-owned record with a common CRUD contract.
///
/// `id` and `user_id` are the store keys; everything else travels as the
/// serialized document.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    const KIND: RecordKind;

    fn id(&self) -> RecordId;

    fn user_id(&self) -> UserId;

    /// Check required fields before the record reaches the store
    fn validate(&self) -> Result<()>;

    /// Replace the user-editable text fields, leaving everything else intact
    fn set_details(&mut self, name: String, description: String);
}

/// A record paired with the store-managed version it was read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<R> {
    pub record: R,
    pub version: i64,
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(RecordKind::Task.collection(), "tasks");
        assert_eq!(RecordKind::Feature.collection(), "features");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        assert!(require_text("name", "x").is_ok());
        assert!(require_text("name", "").is_err());

        let err = require_text("description", "  \t").unwrap_err();
        assert!(err.to_string().contains("description must not be empty"));
    }
}
