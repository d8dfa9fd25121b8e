// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod record_store;

// Re-exports
pub use id_provider::{IdProvider, UuidProvider};
pub use record_store::{
    RecordAdder, RecordDeleter, RecordGetter, RecordLister, RecordUpdater, Repository,
    VersionedRecordStore,
};
