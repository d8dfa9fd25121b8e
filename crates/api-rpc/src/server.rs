//! JSON-RPC Server
//!
//! Serves JSON-RPC 2.0 over HTTP. Method names are versioned
//! (`<area>.<action>.v1`) so payloads can evolve without breaking clients.

use crate::handler::RpcHandler;
use crate::types::{
    AddFeatureRequest, AddTaskRequest, ListRequest, RecordKeyRequest, UpdateFeatureRequest,
    UpdateTaskRequest, UpvoteRequest,
};
use featureboard_core::application::{FeatureService, TaskService, VotingService};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 8083;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 binds an ephemeral port
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// A started server and the address it actually bound
pub struct RunningServer {
    pub local_addr: SocketAddr,
    pub handle: ServerHandle,
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

// Registers `$name` to parse `$req` from named params and call `$method`
macro_rules! register {
    ($module:ident, $handler:expr, $name:literal, $req:ty, $method:ident) => {{
        let handler = $handler.clone();
        $module
            .register_async_method($name, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: $req = params.parse()?;
                    handler.$method(req).await
                }
            })
            .map_err(|e| e.to_string())?;
    }};
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        tasks: Arc<TaskService>,
        features: Arc<FeatureService>,
        voting: Arc<VotingService>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(tasks, features, voting)),
        }
    }

    fn build_module(&self) -> Result<RpcModule<()>, String> {
        let mut module = RpcModule::new(());

        // Admin
        let handler = self.handler.clone();
        module
            .register_async_method("admin.status.v1", move |_, _, _| {
                let handler = handler.clone();
                async move { handler.status().await }
            })
            .map_err(|e| e.to_string())?;

        // Tasks
        register!(module, self.handler, "task.add.v1", AddTaskRequest, add_task);
        register!(module, self.handler, "task.get.v1", RecordKeyRequest, get_task);
        register!(module, self.handler, "task.list.v1", ListRequest, list_tasks);
        register!(module, self.handler, "task.update.v1", UpdateTaskRequest, update_task);
        register!(module, self.handler, "task.delete.v1", RecordKeyRequest, delete_task);

        // Features
        register!(module, self.handler, "feature.add.v1", AddFeatureRequest, add_feature);
        register!(module, self.handler, "feature.get.v1", RecordKeyRequest, get_feature);
        register!(module, self.handler, "feature.list.v1", ListRequest, list_features);
        register!(
            module,
            self.handler,
            "feature.update.v1",
            UpdateFeatureRequest,
            update_feature
        );
        register!(
            module,
            self.handler,
            "feature.delete.v1",
            RecordKeyRequest,
            delete_feature
        );
        register!(module, self.handler, "feature.upvote.v1", UpvoteRequest, upvote);

        Ok(module)
    }

    /// Bind and start serving
    ///
    /// Returns once the listener is bound; requests are served in the
    /// background until the handle is stopped.
    pub async fn start(self) -> Result<RunningServer, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let module = self.build_module()?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok(RunningServer { local_addr, handle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featureboard_core::domain::{Feature, Task};
    use featureboard_core::port::UuidProvider;
    use featureboard_core::testing::InMemoryRecordStore;

    fn server() -> RpcServer {
        let ids = Arc::new(UuidProvider);
        let feature_store = Arc::new(InMemoryRecordStore::<Feature>::new());
        let tasks: TaskService =
            TaskService::new(Arc::new(InMemoryRecordStore::<Task>::new()), ids.clone());
        let features: FeatureService = FeatureService::new(feature_store.clone(), ids);

        RpcServer::new(
            RpcServerConfig::default(),
            Arc::new(tasks),
            Arc::new(features),
            Arc::new(VotingService::new(feature_store)),
        )
    }

    #[test]
    fn test_all_methods_registered() {
        let module = server().build_module().unwrap();
        let mut names: Vec<_> = module.method_names().collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "admin.status.v1",
                "feature.add.v1",
                "feature.delete.v1",
                "feature.get.v1",
                "feature.list.v1",
                "feature.update.v1",
                "feature.upvote.v1",
                "task.add.v1",
                "task.delete.v1",
                "task.get.v1",
                "task.list.v1",
                "task.update.v1",
            ]
        );
    }

    #[tokio::test]
    async fn test_start_on_ephemeral_port() {
        let mut rpc = server();
        rpc.config.port = 0;

        let running = rpc.start().await.unwrap();
        assert_ne!(running.local_addr.port(), 0);

        running.handle.stop().unwrap();
        running.handle.stopped().await;
    }
}
