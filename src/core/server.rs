//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the Reddit tools.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/reddit/` with one file per
//! tool. Each tool defines:
//! - Parameters struct (deserialized from the call arguments)
//! - `execute()` method (validation, fetch and projection)
//! - `create_route()` method (binds the tool to the shared gateway)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result as ServerResult;
use super::reddit::RedditClient;
use crate::domains::tools::build_tool_router;

/// The main MCP server handler.
///
/// Clones share the configuration and the single [`RedditClient`], whose
/// throttle spans every connection.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Rate-limited gateway shared by all tools.
    client: Arc<RedditClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> ServerResult<Self> {
        config.validate()?;

        let config = Arc::new(config);
        let client = Arc::new(RedditClient::new(&config.reddit)?);

        info!(
            "Reddit gateway ready: {} (min interval {:?})",
            client.base_url(),
            client.min_interval()
        );

        Ok(Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config,
            client,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the shared Reddit gateway.
    pub fn client(&self) -> &Arc<RedditClient> {
        &self.client
    }

    /// List all available tools as JSON descriptors.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                title: None,
                version: self.config.server.version.clone(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only access to Reddit: hot and top posts, search, post comments and \
                 subreddit metadata. Requests to Reddit are spaced at least one interval apart, \
                 so consecutive calls may be delayed."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
