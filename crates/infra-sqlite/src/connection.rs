// SQLite Connection Pool Setup

use featureboard_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Create SQLite connection pool with WAL mode
///
/// The pool is the process-wide store handle: open it once at startup, hand
/// clones to the record stores, and close it once with [`close_pool`].
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Config(format!("Invalid database url {}: {}", database_url, e)))?
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to open database: {}", e)))?;

    info!(database_url = %database_url, max_connections, "SQLite connected");
    Ok(pool)
}

/// Close every pooled connection, waiting for in-flight queries
pub async fn close_pool(pool: &SqlitePool) {
    pool.close().await;
    info!("SQLite disconnected");
}
