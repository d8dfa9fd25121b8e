//! Daemon configuration, read once from the environment at startup.

use anyhow::{anyhow, Context, Result};
use featureboard_api_rpc::server::{DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
use featureboard_core::application::DEFAULT_MAX_ATTEMPTS;
use featureboard_infra_sqlite::{DEFAULT_MAX_CONNECTIONS, DEFAULT_OPERATION_TIMEOUT};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DB_PATH: &str = "~/.featureboard/featureboard.db";

pub const ENV_DB_PATH: &str = "FEATUREBOARD_DB_PATH";
pub const ENV_RPC_HOST: &str = "FEATUREBOARD_RPC_HOST";
pub const ENV_RPC_PORT: &str = "FEATUREBOARD_RPC_PORT";
pub const ENV_DB_MAX_CONNECTIONS: &str = "FEATUREBOARD_DB_MAX_CONNECTIONS";
pub const ENV_STORE_TIMEOUT_MS: &str = "FEATUREBOARD_STORE_TIMEOUT_MS";
pub const ENV_UPVOTE_MAX_ATTEMPTS: &str = "FEATUREBOARD_UPVOTE_MAX_ATTEMPTS";
pub const ENV_LOG_FORMAT: &str = "FEATUREBOARD_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Development: human readable, colored
    Pretty,
    /// Production: one JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("expected `pretty` or `json`, got `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub db_path: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub db_max_connections: u32,
    pub store_timeout: Duration,
    pub upvote_max_attempts: u32,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let config = Self {
            db_path: shellexpand::tilde(&db_path).into_owned(),
            rpc_host: lookup(ENV_RPC_HOST).unwrap_or_else(|| DEFAULT_RPC_HOST.to_string()),
            rpc_port: parse_or(&lookup, ENV_RPC_PORT, DEFAULT_RPC_PORT)?,
            db_max_connections: parse_or(&lookup, ENV_DB_MAX_CONNECTIONS, DEFAULT_MAX_CONNECTIONS)?,
            store_timeout: Duration::from_millis(parse_or(
                &lookup,
                ENV_STORE_TIMEOUT_MS,
                DEFAULT_OPERATION_TIMEOUT.as_millis() as u64,
            )?),
            upvote_max_attempts: parse_or(&lookup, ENV_UPVOTE_MAX_ATTEMPTS, DEFAULT_MAX_ATTEMPTS)?,
            log_format: parse_or(&lookup, ENV_LOG_FORMAT, LogFormat::Pretty)?,
        };

        if config.db_max_connections == 0 {
            return Err(anyhow!("{} must be at least 1", ENV_DB_MAX_CONNECTIONS));
        }
        if config.upvote_max_attempts == 0 {
            return Err(anyhow!("{} must be at least 1", ENV_UPVOTE_MAX_ATTEMPTS));
        }
        if config.store_timeout.is_zero() {
            return Err(anyhow!("{} must be positive", ENV_STORE_TIMEOUT_MS));
        }

        Ok(config)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow!("{}", e))
            .with_context(|| format!("Invalid {}={:?}", key, raw)),
    }
}
