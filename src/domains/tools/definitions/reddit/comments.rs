//! Reddit comments tool.
//!
//! Reddit answers a comments request with two listings: the post itself and
//! its top-level comment forest. Only `t1` things of the second listing are
//! kept; "load more" stubs are dropped and nested replies are not flattened.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::Tool,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::core::reddit::{
    RedditClient, RedditError,
    model::{KIND_COMMENT, Listing, RawComment},
};
use crate::domains::tools::ToolError;

use super::common::{
    LONG_TEXT_MAX_CHARS, default_comment_limit, deserialize_limit, parse_params,
    structured_result, to_iso8601, truncate, validate_limit, validate_post_id, validate_subreddit,
};

/// Parameters for the comments tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCommentsParams {
    #[schemars(description = "Subreddit name (without r/)")]
    pub subreddit: String,

    #[schemars(description = "Post ID (e.g. '1abc23')")]
    #[serde(rename = "postId", alias = "post_id")]
    pub post_id: String,

    #[schemars(description = "Maximum number of comments (default: 20, range: 1-100)")]
    #[serde(default = "default_comment_limit", deserialize_with = "deserialize_limit")]
    #[schemars(with = "i64")]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CommentSummary {
    pub author: Option<String>,
    pub score: Option<i64>,
    /// First 500 characters of the comment.
    pub body: Option<String>,
    pub created: Option<String>,
}

impl From<RawComment> for CommentSummary {
    fn from(comment: RawComment) -> Self {
        Self {
            body: comment
                .body
                .as_deref()
                .map(|text| truncate(text, LONG_TEXT_MAX_CHARS)),
            created: comment.created_utc.and_then(to_iso8601),
            author: comment.author,
            score: comment.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResult {
    pub subreddit: String,
    pub post_id: String,
    pub count: usize,
    pub comments: Vec<CommentSummary>,
}

/// Keep the comment things of a listing, in order.
pub fn project_comments(listing: Listing<Value>) -> Result<Vec<CommentSummary>, RedditError> {
    listing
        .data
        .children
        .into_iter()
        .filter(|child| {
            let keep = child.kind == KIND_COMMENT;
            if !keep {
                debug!("Skipping non-comment thing of kind {}", child.kind);
            }
            keep
        })
        .map(|child| {
            serde_json::from_value::<RawComment>(child.data)
                .map(CommentSummary::from)
                .map_err(|e| RedditError::malformed(format!("invalid comment: {}", e)))
        })
        .collect()
}

/// Reddit Comments Tool implementation.
#[derive(Debug, Clone)]
pub struct GetCommentsTool;

impl GetCommentsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_comments";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get top-level comments on a post. Returns author, score, the first 500 characters of the body and creation time (ISO-8601) for each comment.";

    pub fn path(subreddit: &str, post_id: &str, limit: u32) -> String {
        format!("/r/{}/comments/{}.json?limit={}", subreddit, post_id, limit)
    }

    #[instrument(skip_all, fields(subreddit = %params.subreddit, post_id = %params.post_id))]
    pub async fn execute(
        params: &GetCommentsParams,
        client: &RedditClient,
    ) -> Result<CommentsResult, ToolError> {
        let subreddit = validate_subreddit(&params.subreddit)?;
        let post_id = validate_post_id(&params.post_id)?;
        let limit = validate_limit(params.limit);

        info!("Fetching {} comments for post {} in r/{}", limit, post_id, subreddit);

        let listings: Vec<Listing<Value>> = client
            .fetch(&Self::path(&subreddit, &post_id, limit))
            .await?;
        let replies = listings.into_iter().nth(1).ok_or_else(|| {
            RedditError::malformed("expected a post listing followed by a comment listing")
        })?;
        let comments = project_comments(replies)?;

        Ok(CommentsResult {
            subreddit,
            post_id,
            count: comments.len(),
            comments,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetCommentsParams>(),
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
                let params: GetCommentsParams = parse_params(args)?;
                match Self::execute(&params, &client).await {
                    Ok(result) => Ok(structured_result(&result.comments, &result)),
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

    fn comment(author: &str, body: &str) -> Value {
        json!({ "kind": "t1", "data": {
            "author": author,
            "score": 3,
            "body": body,
            "created_utc": 0.0,
            "replies": { "kind": "Listing", "data": { "children": [
                { "kind": "t1", "data": { "author": "nested", "body": "not flattened" } }
            ] } }
        } })
    }

    fn more() -> Value {
        json!({ "kind": "more", "data": { "count": 12, "children": ["abc", "def"] } })
    }

    #[test]
    fn test_comments_params_defaults_and_camel_case() {
        let params: GetCommentsParams =
            serde_json::from_str(r#"{"subreddit": "rust", "postId": "1abc23"}"#).unwrap();
        assert_eq!(params.post_id, "1abc23");
        assert_eq!(params.limit, 20);

        let params: GetCommentsParams =
            serde_json::from_str(r#"{"subreddit": "rust", "post_id": "1abc23"}"#).unwrap();
        assert_eq!(params.post_id, "1abc23");
    }

    #[test]
    fn test_comments_path() {
        assert_eq!(
            GetCommentsTool::path("rust", "1abc23", 20),
            "/r/rust/comments/1abc23.json?limit=20"
        );
    }

    #[test]
    fn test_project_comments_keeps_only_comments_in_order() {
        let listing: Listing<Value> = serde_json::from_value(json!({
            "kind": "Listing",
            "data": { "children": [
                comment("first", "a"),
                more(),
                comment("second", "b"),
                { "kind": "t3", "data": { "title": "stray post" } },
                comment("third", "c"),
            ] }
        }))
        .unwrap();

        let comments = project_comments(listing).unwrap();
        let authors: Vec<_> = comments
            .iter()
            .map(|c| c.author.as_deref().unwrap())
            .collect();
        assert_eq!(authors, vec!["first", "second", "third"]);
        assert_eq!(
            comments[0].created.as_deref(),
            Some("1970-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_project_comments_truncates_body() {
        let long = "z".repeat(800);
        let listing: Listing<Value> = serde_json::from_value(json!({
            "data": { "children": [ comment("verbose", &long) ] }
        }))
        .unwrap();

        let comments = project_comments(listing).unwrap();
        assert_eq!(comments[0].body.as_ref().unwrap().chars().count(), 500);
    }

    #[tokio::test]
    async fn test_get_comments_reads_second_listing() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/r/rust/comments/1abc23.json")
                    .query_param("limit", "20");
                then.status(200).json_body(json!([
                    { "kind": "Listing", "data": { "children": [
                        { "kind": "t3", "data": { "title": "the post" } }
                    ] } },
                    { "kind": "Listing", "data": { "children": [
                        comment("alice", "hello"),
                        more()
                    ] } }
                ]));
            })
            .await;

        let client = test_client(server.base_url());
        let params = GetCommentsParams {
            subreddit: "rust".to_string(),
            post_id: "t3_1abc23".to_string(),
            limit: 20,
        };
        let result = GetCommentsTool::execute(&params, &client).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.post_id, "1abc23");
        assert_eq!(result.count, 1);
        assert_eq!(result.comments[0].author.as_deref(), Some("alice"));
        assert_eq!(result.comments[0].body.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_get_comments_single_listing_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/r/rust/comments/1abc23.json");
                then.status(200)
                    .json_body(json!([ { "kind": "Listing", "data": { "children": [] } } ]));
            })
            .await;

        let client = test_client(server.base_url());
        let params = GetCommentsParams {
            subreddit: "rust".to_string(),
            post_id: "1abc23".to_string(),
            limit: 20,
        };
        let err = GetCommentsTool::execute(&params, &client).await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::Reddit(RedditError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_get_comments_rejects_bad_post_id() {
        let client = test_client("http://127.0.0.1:9".to_string());
        let params = GetCommentsParams {
            subreddit: "rust".to_string(),
            post_id: "../../about".to_string(),
            limit: 20,
        };
        let err = GetCommentsTool::execute(&params, &client).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
