//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};

/// Smallest spacing between Reddit requests a deployment may configure.
pub const MIN_REQUEST_INTERVAL_MS: u64 = 1000;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Reddit upstream configuration.
    pub reddit: RedditConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the Reddit gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// Base URL of the Reddit JSON API.
    pub base_url: String,

    /// User-Agent sent with every request. Reddit rejects anonymous agents.
    pub user_agent: String,

    /// Minimum spacing between two outbound requests, in milliseconds.
    pub min_interval_ms: u64,

    /// Overall timeout for a single request, in seconds.
    pub timeout_secs: u64,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            user_agent: format!("reddit-mcp-server/{}", env!("CARGO_PKG_VERSION")),
            min_interval_ms: MIN_REQUEST_INTERVAL_MS,
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "reddit-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            reddit: RedditConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_REDDIT_BASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_REDDIT_BASE_URL") {
            info!("Reddit base URL overridden: {}", base_url);
            config.reddit.base_url = base_url;
        }

        if let Ok(user_agent) = std::env::var("MCP_REDDIT_USER_AGENT") {
            config.reddit.user_agent = user_agent;
        }

        if let Some(interval) = parse_env::<u64>("MCP_REDDIT_MIN_INTERVAL_MS") {
            config.reddit.min_interval_ms = interval;
        }

        if let Some(timeout) = parse_env::<u64>("MCP_REDDIT_TIMEOUT_SECS") {
            config.reddit.timeout_secs = timeout;
        }

        config
    }

    /// Check values that would make the server unusable.
    pub fn validate(&self) -> Result<()> {
        if self.reddit.base_url.trim().is_empty() {
            return Err(Error::config("Reddit base URL must not be empty"));
        }
        if self.reddit.user_agent.trim().is_empty() {
            return Err(Error::config("Reddit user agent must not be empty"));
        }
        if self.reddit.min_interval_ms < MIN_REQUEST_INTERVAL_MS {
            return Err(Error::config(format!(
                "Reddit request interval must be at least {} ms, got {}",
                MIN_REQUEST_INTERVAL_MS, self.reddit.min_interval_ms
            )));
        }
        if self.reddit.timeout_secs == 0 {
            return Err(Error::config("Reddit request timeout must be at least one second"));
        }
        Ok(())
    }
}

/// Read and parse an environment variable, keeping the default on bad input.
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}
