//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - Dynamic ToolRouter builder
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/reddit/` (e.g., `new_posts.rs`)
//! 2. Define params, `execute()`, `to_tool()` and `create_route()`
//! 3. Export it in `definitions/reddit/mod.rs` and `definitions/mod.rs`
//! 4. Add the route in `router.rs` using `with_route()`
//!
//! **No need to modify `server.rs`!** The router is built dynamically.

pub mod definitions;
mod error;
pub mod router;

pub use error::ToolError;
pub use router::build_tool_router;
