//! Reddit subreddit metadata tool.

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
    RedditClient, RedditError,
    model::{KIND_SUBREDDIT, RawSubreddit, Thing},
};
use crate::domains::tools::ToolError;

use super::common::{
    LONG_TEXT_MAX_CHARS, parse_params, structured_result, to_iso8601, truncate,
    validate_subreddit,
};

/// Parameters for the subreddit info tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSubredditInfoParams {
    #[schemars(description = "Subreddit name (without r/)")]
    pub subreddit: String,
}

/// Subreddit metadata as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubredditInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    /// Public description, cut to 500 characters.
    pub description: Option<String>,
    pub subscribers: Option<u64>,
    pub active_users: Option<u64>,
    pub created: Option<String>,
    pub nsfw: Option<bool>,
}

impl From<RawSubreddit> for SubredditInfo {
    fn from(sub: RawSubreddit) -> Self {
        Self {
            description: sub
                .public_description
                .as_deref()
                .map(|text| truncate(text, LONG_TEXT_MAX_CHARS)),
            created: sub.created_utc.and_then(to_iso8601),
            name: sub.display_name,
            title: sub.title,
            subscribers: sub.subscribers,
            active_users: sub.accounts_active,
            nsfw: sub.over18,
        }
    }
}

/// Reddit Subreddit Info Tool implementation.
#[derive(Debug, Clone)]
pub struct GetSubredditInfoTool;

impl GetSubredditInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_subreddit_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get subreddit metadata: display name, title, description, subscriber count, active users, creation time (ISO-8601) and NSFW flag.";

    pub fn path(subreddit: &str) -> String {
        format!("/r/{}/about.json", subreddit)
    }

    #[instrument(skip_all, fields(subreddit = %params.subreddit))]
    pub async fn execute(
        params: &GetSubredditInfoParams,
        client: &RedditClient,
    ) -> Result<SubredditInfo, ToolError> {
        let subreddit = validate_subreddit(&params.subreddit)?;

        info!("Fetching metadata for r/{}", subreddit);

        let about: Thing<RawSubreddit> = client.fetch(&Self::path(&subreddit)).await?;
        // Unknown subreddits can be answered with a search listing instead of a 404.
        if about.kind != KIND_SUBREDDIT {
            return Err(RedditError::malformed(format!(
                "expected a subreddit ({}), got kind {:?}",
                KIND_SUBREDDIT, about.kind
            ))
            .into());
        }
        Ok(SubredditInfo::from(about.data))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetSubredditInfoParams>(),
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
                let params: GetSubredditInfoParams = parse_params(args)?;
                match Self::execute(&params, &client).await {
                    Ok(info) => Ok(structured_result(&info, &info)),
                    Err(e) => e.into_call_result(),
                }
            }
            .boxed()
        })
    }
}
