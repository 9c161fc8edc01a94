//! Tool Router - builds the rmcp ToolRouter.
//!
//! Each tool knows how to create its own route; this module only hands every
//! route the same gateway so the rate limit is shared across tools.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::reddit::RedditClient;

use super::definitions::{GetCommentsTool, GetHotTool, GetSubredditInfoTool, GetTopTool, SearchTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<RedditClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetHotTool::create_route(client.clone()))
        .with_route(GetTopTool::create_route(client.clone()))
        .with_route(SearchTool::create_route(client.clone()))
        .with_route(GetCommentsTool::create_route(client.clone()))
        .with_route(GetSubredditInfoTool::create_route(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RedditConfig;

    struct TestServer {}

    fn test_client() -> Arc<RedditClient> {
        Arc::new(RedditClient::new(&RedditConfig::default()).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        let tools = router.list_all();
        assert_eq!(tools.len(), 5);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_hot"));
        assert!(names.contains(&"get_top"));
        assert!(names.contains(&"search"));
        assert!(names.contains(&"get_comments"));
        assert!(names.contains(&"get_subreddit_info"));
    }

    #[test]
    fn test_tool_schemas_declare_parameters() {
        let router: ToolRouter<TestServer> = build_tool_router(test_client());
        for tool in router.list_all() {
            let schema = serde_json::Value::Object((*tool.input_schema).clone());
            let properties = &schema["properties"];
            assert!(properties.is_object(), "{} has no properties", tool.name);

            match tool.name.as_ref() {
                "search" => assert!(properties.get("query").is_some()),
                "get_comments" => assert!(properties.get("postId").is_some()),
                _ => assert!(properties.get("subreddit").is_some()),
            }
        }
    }
}
