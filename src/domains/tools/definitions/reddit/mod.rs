//! Reddit tools module.
//!
//! This module provides the read-only Reddit query tools:
//! - `hot`: Hot posts of a subreddit
//! - `top`: Top posts of a subreddit over a time window
//! - `search`: Post search, site-wide or within a subreddit
//! - `comments`: Top-level comments of a post
//! - `subreddit_info`: Subreddit metadata
//!
//! Every tool fetches through the shared, rate-limited [`RedditClient`].
//!
//! [`RedditClient`]: crate::core::reddit::RedditClient

pub mod comments;
pub mod common;
pub mod hot;
pub mod search;
pub mod subreddit_info;
pub mod top;

pub use comments::{GetCommentsParams, GetCommentsTool};
pub use hot::{GetHotParams, GetHotTool};
pub use search::{SearchParams, SearchTool};
pub use subreddit_info::{GetSubredditInfoParams, GetSubredditInfoTool};
pub use top::{GetTopParams, GetTopTool};
