// Domain Layer - Pure business logic and entities

pub mod error;
pub mod feature;
pub mod record;
pub mod task;

// Re-exports
pub use error::DomainError;
pub use feature::Feature;
pub use record::{Record, RecordId, RecordKind, UserId, Versioned};
pub use task::Task;
