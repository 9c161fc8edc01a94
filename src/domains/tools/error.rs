//! Tool-specific error types.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use thiserror::Error;
use tracing::warn;

use crate::core::reddit::RedditError;

use super::definitions::reddit::common::error_result;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The upstream fetch failed.
    #[error(transparent)]
    Reddit(#[from] RedditError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Map this error onto the MCP surface.
    ///
    /// Bad arguments are a protocol-level `invalid_params` error. Everything
    /// that went wrong after validation becomes a tool result with
    /// `isError: true` so the calling agent can read the message.
    pub fn into_call_result(self) -> Result<CallToolResult, McpError> {
        match self {
            Self::InvalidArguments(msg) => {
                warn!("Rejected tool arguments: {}", msg);
                Err(McpError::invalid_params(msg, None))
            }
            other => Ok(error_result(&other.to_string())),
        }
    }
}
