// ID Provider Port (for deterministic testing)

use crate::domain::RecordId;

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique record ID
    fn generate_id(&self) -> RecordId;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> RecordId {
        uuid::Uuid::new_v4()
    }
}
