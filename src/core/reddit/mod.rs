//! Reddit upstream gateway.
//!
//! - `client.rs` - the rate-limited [`RedditClient`] every tool fetches through
//! - `throttle.rs` - minimum-interval serialization of outbound requests
//! - `model.rs` - wire models for listings, posts, comments and subreddits
//! - `error.rs` - gateway error taxonomy

mod client;
mod error;
pub mod model;
mod throttle;

pub use client::RedditClient;
pub use error::{RedditError, RedditResult};
pub use throttle::Throttle;
