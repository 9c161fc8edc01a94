//! Reddit top posts tool.
//!
//! Lists the highest scoring posts of a subreddit over a time window.

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
    TimeWindow, default_limit, deserialize_limit, full_permalink, parse_params, structured_result,
    validate_limit, validate_subreddit,
};

fn default_window() -> TimeWindow {
    TimeWindow::Week
}

/// Parameters for the top posts tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTopParams {
    #[schemars(description = "Subreddit name (without r/)")]
    pub subreddit: String,

    #[schemars(description = "Time window: hour, day, week, month, year or all (default: week)")]
    #[serde(default = "default_window")]
    pub time: TimeWindow,

    #[schemars(description = "Maximum number of posts (default: 10, range: 1-100)")]
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    #[schemars(with = "i64")]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub num_comments: Option<i64>,
    pub permalink: Option<String>,
}

impl From<RawPost> for TopPost {
    fn from(post: RawPost) -> Self {
        Self {
            permalink: full_permalink(post.permalink.as_deref()),
            title: post.title,
            author: post.author,
            score: post.score,
            num_comments: post.num_comments,
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct TopPostsResult {
    pub subreddit: String,
    pub time: TimeWindow,
    pub count: usize,
    pub posts: Vec<TopPost>,
}

/// Reddit Top Posts Tool implementation.
#[derive(Debug, Clone)]
pub struct GetTopTool;

impl GetTopTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_top";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get top posts from a subreddit for a time window (hour, day, week, month, year, all). Returns title, author, score, comment count and permalink for each post.";

    pub fn path(subreddit: &str, time: TimeWindow, limit: u32) -> String {
        format!(
            "/r/{}/top.json?t={}&limit={}",
            subreddit,
            time.as_str(),
            limit
        )
    }

    #[instrument(skip_all, fields(subreddit = %params.subreddit))]
    pub async fn execute(
        params: &GetTopParams,
        client: &RedditClient,
    ) -> Result<TopPostsResult, ToolError> {
        let subreddit = validate_subreddit(&params.subreddit)?;
        let limit = validate_limit(params.limit);

        info!(
            "Fetching {} top posts ({}) from r/{}",
            limit,
            params.time.as_str(),
            subreddit
        );

        let listing: Listing<RawPost> = client
            .fetch(&Self::path(&subreddit, params.time, limit))
            .await?;
        let posts: Vec<TopPost> = listing.into_items().map(TopPost::from).collect();

        Ok(TopPostsResult {
            subreddit,
            time: params.time,
            count: posts.len(),
            posts,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetTopParams>(),
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
                let params: GetTopParams = parse_params(args)?;
                match Self::execute(&params, &client).await {
                    Ok(result) => Ok(structured_result(&result.posts, &result)),
                    Err(e) => e.into_call_result(),
                }
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::test_support::test_client;
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_top_params_defaults() {
        let params: GetTopParams = serde_json::from_str(r#"{"subreddit": "rust"}"#).unwrap();
        assert_eq!(params.time, TimeWindow::Week);
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn test_top_params_rejects_unknown_window() {
        let result: Result<GetTopParams, _> =
            serde_json::from_str(r#"{"subreddit": "rust", "time": "decade"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_top_path() {
        assert_eq!(
            GetTopTool::path("rust", TimeWindow::All, 25),
            "/r/rust/top.json?t=all&limit=25"
        );
    }

    #[tokio::test]
    async fn test_get_top_projects_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/r/rust/top.json")
                    .query_param("t", "month")
                    .query_param("limit", "1");
                then.status(200).json_body(json!({
                    "kind": "Listing",
                    "data": { "children": [ { "kind": "t3", "data": {
                        "title": "Rust 2.0 announced",
                        "author": "ferris",
                        "score": 9001,
                        "num_comments": 420,
                        "selftext": "ignored by this tool",
                        "permalink": "/r/rust/comments/xyz/rust_20/"
                    } } ] }
                }));
            })
            .await;

        let client = test_client(server.base_url());
        let params = GetTopParams {
            subreddit: "rust".to_string(),
            time: TimeWindow::Month,
            limit: 1,
        };
        let result = GetTopTool::execute(&params, &client).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result.posts,
            vec![TopPost {
                title: Some("Rust 2.0 announced".to_string()),
                author: Some("ferris".to_string()),
                score: Some(9001),
                num_comments: Some(420),
                permalink: Some("https://reddit.com/r/rust/comments/xyz/rust_20/".to_string()),
            }]
        );

        let rendered = serde_json::to_value(&result.posts[0]).unwrap();
        assert_eq!(rendered["numComments"], 420);
        assert!(rendered.get("selftext").is_none());
    }

    #[tokio::test]
    async fn test_get_top_clamps_zero_limit() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/r/rust/top.json")
                    .query_param("limit", "1");
                then.status(200).json_body(json!({ "data": { "children": [] } }));
            })
            .await;

        let client = test_client(server.base_url());
        let params = GetTopParams {
            subreddit: "rust".to_string(),
            time: TimeWindow::Week,
            limit: 0,
        };
        GetTopTool::execute(&params, &client).await.unwrap();
        mock.assert_async().await;
    }
}
