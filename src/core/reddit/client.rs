//! Rate-limited gateway to the Reddit JSON API.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{RedditError, RedditResult};
use super::throttle::Throttle;
use crate::core::config::RedditConfig;

/// Upper bound for establishing a connection, independent of the request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The single gateway through which every upstream request flows.
///
/// One instance is created per server and shared (behind an `Arc`) by all
/// tools, so the throttle applies across every tool invocation.
#[derive(Debug)]
pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
    throttle: Throttle,
}

impl RedditClient {
    /// Build a client from configuration.
    pub fn new(config: &RedditConfig) -> RedditResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(|e| RedditError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            throttle: Throttle::new(Duration::from_millis(config.min_interval_ms)),
        })
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The minimum spacing between outbound requests.
    pub fn min_interval(&self) -> Duration {
        self.throttle.interval()
    }

    /// Fetch `path` and return the body as untyped JSON.
    pub async fn fetch_json(&self, path: &str) -> RedditResult<serde_json::Value> {
        self.fetch(path).await
    }

    /// Fetch `path` and decode the body into `T`.
    ///
    /// `path` must start with `/` and may include a query string.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> RedditResult<T> {
        let url = format!("{}{}", self.base_url, path);

        self.throttle.acquire().await;
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Reddit responded with {} for {}", status, path);
            return Err(RedditError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| RedditError::malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde::Deserialize;
    use serde_json::json;
    use tokio_test::assert_ok;

    fn test_config(base_url: String) -> RedditConfig {
        RedditConfig {
            base_url,
            min_interval_ms: 50,
            ..RedditConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_json_sends_user_agent() {
        let server = MockServer::start_async().await;
        let config = test_config(server.base_url());
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/r/rust/about.json")
                    .header("user-agent", config.user_agent.as_str());
                then.status(200).json_body(json!({ "kind": "t5", "data": {} }));
            })
            .await;

        let client = assert_ok!(RedditClient::new(&config));
        let value = assert_ok!(client.fetch_json("/r/rust/about.json").await);

        mock.assert_async().await;
        assert_eq!(value["kind"], "t5");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/r/missing/about.json");
                then.status(404);
            })
            .await;

        let client = RedditClient::new(&test_config(server.base_url())).unwrap();
        let err = client.fetch_json("/r/missing/about.json").await.unwrap_err();

        assert!(matches!(err, RedditError::Upstream { status: 404 }));
        assert_eq!(err.to_string(), "Reddit returned HTTP 404");
    }

    #[tokio::test]
    async fn test_rate_limited_status_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/r/rust/hot.json");
                then.status(429);
            })
            .await;

        let client = RedditClient::new(&test_config(server.base_url())).unwrap();
        let err = client.fetch_json("/r/rust/hot.json").await.unwrap_err();

        assert_eq!(err.status(), Some(429));
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/r/rust/hot.json");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let client = RedditClient::new(&test_config(server.base_url())).unwrap();
        let err = client.fetch_json("/r/rust/hot.json").await.unwrap_err();

        assert!(matches!(err, RedditError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_malformed() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Expected {
            data: serde_json::Value,
        }

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/r/rust/about.json");
                then.status(200).json_body(json!({ "error": "nope" }));
            })
            .await;

        let client = RedditClient::new(&test_config(server.base_url())).unwrap();
        let err = client
            .fetch::<Expected>("/r/rust/about.json")
            .await
            .unwrap_err();

        assert!(matches!(err, RedditError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on port 9 of the loopback interface.
        let client = RedditClient::new(&test_config("http://127.0.0.1:9".to_string())).unwrap();
        let err = client.fetch_json("/r/rust/hot.json").await.unwrap_err();

        assert!(matches!(err, RedditError::Transport(_)));
    }

    #[tokio::test]
    async fn test_consecutive_requests_respect_interval() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/r/rust/hot.json");
                then.status(200).json_body(json!({}));
            })
            .await;

        let client = RedditClient::new(&test_config(server.base_url())).unwrap();
        let start = std::time::Instant::now();
        for _ in 0..3 {
            assert_ok!(client.fetch_json("/r/rust/hot.json").await);
        }

        assert!(start.elapsed() >= client.min_interval() * 2);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            RedditClient::new(&test_config("https://www.reddit.com/".to_string())).unwrap();
        assert_eq!(client.base_url(), "https://www.reddit.com");
    }
}
