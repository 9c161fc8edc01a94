//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the rate-limited Reddit gateway,
//! server lifecycle management, and transport layer abstractions.

pub mod config;
pub mod error;
pub mod reddit;
pub mod server;
pub mod transport;

pub use config::{Config, LoggingConfig, RedditConfig};
pub use error::{Error, Result};
pub use reddit::{RedditClient, RedditError};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
