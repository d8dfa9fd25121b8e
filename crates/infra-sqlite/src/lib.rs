// Feature Board Infrastructure - SQLite Adapter
// Implements: the record store ports for Task and Feature

mod connection;
mod migration;
mod record_store;

pub use connection::{close_pool, create_pool, DEFAULT_MAX_CONNECTIONS};
pub use migration::run_migrations;
pub use record_store::{
    SqliteFeatureStore, SqliteRecordStore, SqliteTaskStore, DEFAULT_OPERATION_TIMEOUT,
};

// Note: sqlx::Error conversion is handled by `map_sqlx_error` in record_store
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
