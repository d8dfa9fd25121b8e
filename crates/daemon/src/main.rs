//! Feature Board - Main Entry Point
//!
//! Composition root: reads configuration, opens the store, wires the
//! services and serves JSON-RPC until Ctrl+C.

mod config;
mod logging;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use config::DaemonConfig;
use featureboard_api_rpc::{RpcServer, RpcServerConfig};
use featureboard_core::application::{FeatureService, TaskService, VotingService};
use featureboard_core::port::UuidProvider;
use featureboard_infra_sqlite::{
    close_pool, create_pool, run_migrations, SqliteFeatureStore, SqliteTaskStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Configuration (invalid values abort startup)
    let config = DaemonConfig::from_env()?;

    // 2. Logging
    logging::init_logging(config.log_format)?;
    info!("Feature Board v{} starting...", featureboard_core::VERSION);

    // 3. Database
    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    info!(db_path = %config.db_path, "Initializing database...");
    let pool = create_pool(&config.db_path, config.db_max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let id_provider = Arc::new(UuidProvider);
    let task_store = Arc::new(SqliteTaskStore::new(pool.clone()).with_timeout(config.store_timeout));
    let feature_store =
        Arc::new(SqliteFeatureStore::new(pool.clone()).with_timeout(config.store_timeout));

    let tasks: TaskService = TaskService::new(task_store, id_provider.clone());
    let features: FeatureService = FeatureService::new(feature_store.clone(), id_provider)
        .with_max_attempts(config.upvote_max_attempts);
    let voting = VotingService::new(feature_store).with_max_attempts(config.upvote_max_attempts);

    // 5. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let running = RpcServer::new(
        rpc_config,
        Arc::new(tasks),
        Arc::new(features),
        Arc::new(voting),
    )
    .start()
    .await
    .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %running.local_addr, "System ready");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown: stop accepting calls, then release the store
    running
        .handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    running.handle.stopped().await;
    close_pool(&pool).await;

    info!("Shutdown complete.");
    Ok(())
}
