//! Reddit hot posts tool.
//!
//! Lists the current hot posts of a subreddit with a short excerpt of each
//! post's self-text.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::reddit::{
    RedditClient,
    model::{Listing, RawPost},
};
use crate::domains::tools::ToolError;

use super::common::{
    SELFTEXT_MAX_CHARS, default_limit, deserialize_limit, full_permalink, parse_params,
    structured_result, to_iso8601, truncate, validate_limit, validate_subreddit,
};

/// Parameters for the hot posts tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetHotParams {
    /// Subreddit name, without the `r/` prefix.
    #[schemars(description = "Subreddit name (without r/)")]
    pub subreddit: String,

    /// Maximum number of posts to return (default: 10, clamped to 1-100).
    #[schemars(description = "Maximum number of posts (default: 10, range: 1-100)")]
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    #[schemars(with = "i64")]
    pub limit: i64,
}

/// A hot post as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotPost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub url: Option<String>,
    /// First 300 characters of the self-text; empty for link posts.
    pub selftext: String,
    pub num_comments: Option<i64>,
    pub created: Option<String>,
    pub permalink: Option<String>,
}

impl From<RawPost> for HotPost {
    fn from(post: RawPost) -> Self {
        Self {
            selftext: post
                .selftext
                .as_deref()
                .map(|text| truncate(text, SELFTEXT_MAX_CHARS))
                .unwrap_or_default(),
            created: post.created_utc.and_then(to_iso8601),
            permalink: full_permalink(post.permalink.as_deref()),
            title: post.title,
            author: post.author,
            score: post.score,
            url: post.url,
            num_comments: post.num_comments,
        }
    }
}

/// Structured output for the hot posts tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct HotPostsResult {
    pub subreddit: String,
    pub count: usize,
    pub posts: Vec<HotPost>,
}

/// Reddit Hot Posts Tool implementation.
#[derive(Debug, Clone)]
pub struct GetHotTool;

impl GetHotTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_hot";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get hot posts from a subreddit. Returns title, author, score, URL, the first 300 characters of the self-text, comment count, creation time (ISO-8601) and permalink for each post.";

    /// Upstream path for a hot listing.
    pub fn path(subreddit: &str, limit: u32) -> String {
        format!("/r/{}/hot.json?limit={}", subreddit, limit)
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(subreddit = %params.subreddit))]
    pub async fn execute(
        params: &GetHotParams,
        client: &RedditClient,
    ) -> Result<HotPostsResult, ToolError> {
        let subreddit = validate_subreddit(&params.subreddit)?;
        let limit = validate_limit(params.limit);

        info!("Fetching {} hot posts from r/{}", limit, subreddit);

        let listing: Listing<RawPost> = client.fetch(&Self::path(&subreddit, limit)).await?;
        let posts: Vec<HotPost> = listing.into_items().map(HotPost::from).collect();

        Ok(HotPostsResult {
            subreddit,
            count: posts.len(),
            posts,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetHotParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute bound to the shared gateway.
    pub fn create_route<S>(client: Arc<RedditClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: GetHotParams = parse_params(args)?;
                match Self::execute(&params, &client).await {
                    Ok(result) => Ok(structured_result(&result.posts, &result)),
                    Err(e) => e.into_call_result(),
                }
            }
            .boxed()
        })
    }
}
