//! Reddit search tool.
//!
//! Searches posts site-wide, or within one subreddit when `subreddit` is given.

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
    SortMode, TimeWindow, default_limit, deserialize_limit, full_permalink, parse_params,
    require_text, structured_result, validate_limit, validate_subreddit,
};

fn default_window() -> TimeWindow {
    TimeWindow::All
}

/// Parameters for the search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Free-text search query.
    #[schemars(description = "Search query")]
    pub query: String,

    /// Restrict the search to this subreddit.
    #[schemars(description = "Subreddit to search in (without r/). Searches all of Reddit when omitted")]
    #[serde(default)]
    pub subreddit: Option<String>,

    #[schemars(description = "Sort order: relevance, hot, top, new or comments (default: relevance)")]
    #[serde(default)]
    pub sort: SortMode,

    #[schemars(description = "Time window: hour, day, week, month, year or all (default: all)")]
    #[serde(default = "default_window")]
    pub time: TimeWindow,

    #[schemars(description = "Maximum number of results (default: 10, range: 1-100)")]
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    #[schemars(with = "i64")]
    pub limit: i64,
}

/// Query string of a search request, in the order Reddit documents it.
#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    sort: &'static str,
    t: &'static str,
    limit: u32,
    restrict_sr: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SearchHit {
    pub title: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub subreddit: Option<String>,
    pub permalink: Option<String>,
}

impl From<RawPost> for SearchHit {
    fn from(post: RawPost) -> Self {
        Self {
            permalink: full_permalink(post.permalink.as_deref()),
            title: post.title,
            author: post.author,
            score: post.score,
            subreddit: post.subreddit,
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SearchResult {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subreddit: Option<String>,
    pub count: usize,
    pub posts: Vec<SearchHit>,
}

/// Reddit Search Tool implementation.
#[derive(Debug, Clone)]
pub struct SearchTool;

impl SearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search Reddit posts, optionally restricted to one subreddit. Supports sorting (relevance, hot, top, new, comments) and a time window. Returns title, author, score, subreddit and permalink for each hit.";

    /// Upstream path (with form-encoded query string) for a search.
    pub fn path(
        query: &str,
        subreddit: Option<&str>,
        sort: SortMode,
        time: TimeWindow,
        limit: u32,
    ) -> Result<String, ToolError> {
        let base = match subreddit {
            Some(name) => format!("/r/{}/search.json", name),
            None => "/search.json".to_string(),
        };

        let qs = serde_urlencoded::to_string(SearchQuery {
            q: query,
            sort: sort.as_str(),
            t: time.as_str(),
            limit,
            restrict_sr: if subreddit.is_some() { "1" } else { "0" },
        })
        .map_err(|e| ToolError::internal(format!("Failed to encode search query: {}", e)))?;

        Ok(format!("{}?{}", base, qs))
    }

    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(
        params: &SearchParams,
        client: &RedditClient,
    ) -> Result<SearchResult, ToolError> {
        let query = require_text("query", &params.query)?;
        let subreddit = params
            .subreddit
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(validate_subreddit)
            .transpose()?;
        let limit = validate_limit(params.limit);

        match &subreddit {
            Some(name) => info!("Searching r/{} for '{}'", name, query),
            None => info!("Searching Reddit for '{}'", query),
        }

        let path = Self::path(&query, subreddit.as_deref(), params.sort, params.time, limit)?;
        let listing: Listing<RawPost> = client.fetch(&path).await?;
        let posts: Vec<SearchHit> = listing.into_items().map(SearchHit::from).collect();

        Ok(SearchResult {
            query,
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
            input_schema: cached_schema_for_type::<SearchParams>(),
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
                let params: SearchParams = parse_params(args)?;
                match Self::execute(&params, &client).await {
                    Ok(result) => Ok(structured_result(&result.posts, &result)),
                    Err(e) => e.into_call_result(),
                }
            }
            .boxed()
        })
    }
}
