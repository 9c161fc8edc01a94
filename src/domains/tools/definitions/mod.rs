//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod reddit;

pub use reddit::{
    GetCommentsParams, GetCommentsTool, GetHotParams, GetHotTool, GetSubredditInfoParams,
    GetSubredditInfoTool, GetTopParams, GetTopTool, SearchParams, SearchTool,
};
