//! Reddit MCP Server Library
//!
//! This crate exposes read-only Reddit queries (hot posts, top posts, search,
//! comments, subreddit metadata) as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the rate-limited Reddit gateway,
//!   the MCP server handler and its transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The Reddit tools that MCP clients can call
//!
//! All tools share a single [`core::RedditClient`], whose throttle keeps
//! outbound requests at least one interval apart no matter how many calls
//! are in flight.
//!
//! # Example
//!
//! ```rust,no_run
//! use reddit_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
