// Application Layer - Use Cases and Business Logic

pub mod optimistic;
pub mod records;
pub mod voting;

// Re-exports
pub use optimistic::{modify_with_retry, DEFAULT_MAX_ATTEMPTS};
pub use records::{FeatureService, RecordService, TaskService};
pub use voting::{UpvoteOutcome, VotingService};
