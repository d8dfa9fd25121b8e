//! JSON-RPC API Layer
//!
//! Implements the JSON-RPC 2.0 server for Feature Board: binds requests,
//! calls the core services and maps the core error taxonomy to wire codes.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig, RunningServer};
