//! Shared fixtures: file-backed SQLite databases that clean up after themselves.

#![allow(dead_code)]

use featureboard_core::application::{FeatureService, TaskService, VotingService};
use featureboard_core::port::UuidProvider;
use featureboard_infra_sqlite::{create_pool, run_migrations, SqliteFeatureStore, SqliteTaskStore};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

/// A database file under the system temp dir, removed on drop
pub struct TempDb {
    pub path: PathBuf,
}

impl TempDb {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("featureboard_{}.db", uuid::Uuid::new_v4()));
        Self { path }
    }

    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    pub async fn open(&self, max_connections: u32) -> SqlitePool {
        let pool = create_pool(&self.url(), max_connections).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub struct Services {
    pub tasks: Arc<TaskService>,
    pub features: Arc<FeatureService>,
    pub voting: Arc<VotingService>,
}

/// Wire the services over SQLite the same way the daemon does
pub fn services(pool: &SqlitePool, max_attempts: u32) -> Services {
    let ids = Arc::new(UuidProvider);
    let task_store = Arc::new(SqliteTaskStore::new(pool.clone()));
    let feature_store = Arc::new(SqliteFeatureStore::new(pool.clone()));

    let tasks: TaskService = TaskService::new(task_store, ids.clone());
    let features: FeatureService =
        FeatureService::new(feature_store.clone(), ids).with_max_attempts(max_attempts);
    let voting = VotingService::new(feature_store).with_max_attempts(max_attempts);

    Services {
        tasks: Arc::new(tasks),
        features: Arc::new(features),
        voting: Arc::new(voting),
    }
}
