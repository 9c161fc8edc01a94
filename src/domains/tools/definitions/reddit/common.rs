//! Common utilities shared across Reddit tools.
//!
//! Parameter validation, truncation, timestamp formatting and result
//! construction live here so every tool applies the same rules.

use chrono::{DateTime, SecondsFormat};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de, de::DeserializeOwned};
use tracing::warn;

use crate::domains::tools::ToolError;

/// Smallest accepted `limit`.
pub const MIN_LIMIT: i64 = 1;

/// Largest accepted `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Host prefixed to post permalinks.
pub const PERMALINK_HOST: &str = "https://reddit.com";

/// Post self-text is cut to this many characters.
pub const SELFTEXT_MAX_CHARS: usize = 300;

/// Comment bodies and subreddit descriptions are cut to this many characters.
pub const LONG_TEXT_MAX_CHARS: usize = 500;

/// Default limit for post listings and searches.
pub fn default_limit() -> i64 {
    10
}

/// Default limit for comment listings.
pub fn default_comment_limit() -> i64 {
    20
}

/// Clamp a requested limit into `MIN_LIMIT..=MAX_LIMIT`.
///
/// Every tool that accepts a limit clamps instead of rejecting, so `0` and
/// negative values become 1 and anything above 100 becomes 100.
pub fn validate_limit(limit: i64) -> u32 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT) as u32
}

/// Read `limit` from any JSON number so that clamping stays total.
///
/// Integers outside the `i64` range saturate, and integral floats such as
/// `5.0` or `1e20` are accepted. Fractional values are rejected.
pub fn deserialize_limit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        // `as` saturates at the i64 bounds
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(de::Error::custom(format!(
            "limit must be an integer, got {}",
            number
        ))),
    }
}

/// Time window for top listings and searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    /// Value of the `t` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

/// Ordering of search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SortMode {
    /// Value of the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Hot => "hot",
            Self::Top => "top",
            Self::New => "new",
            Self::Comments => "comments",
        }
    }
}

/// Normalize and check a subreddit name.
///
/// Accepts `rust`, `r/rust` and `/r/rust`. Multireddits joined with `+` are
/// allowed; anything that could escape the path segment is not.
pub fn validate_subreddit(raw: &str) -> Result<String, ToolError> {
    let name = raw.trim();
    let name = name
        .strip_prefix("/r/")
        .or_else(|| name.strip_prefix("r/"))
        .unwrap_or(name)
        .trim_end_matches('/');

    if name.is_empty() {
        return Err(ToolError::invalid_arguments("subreddit must not be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+')
    {
        return Err(ToolError::invalid_arguments(format!(
            "Invalid subreddit name: {}",
            raw
        )));
    }
    Ok(name.to_string())
}

/// Normalize and check a post ID, accepting an optional `t3_` fullname prefix.
pub fn validate_post_id(raw: &str) -> Result<String, ToolError> {
    let id = raw.trim();
    let id = id.strip_prefix("t3_").unwrap_or(id);

    if id.is_empty() {
        return Err(ToolError::invalid_arguments("postId must not be empty"));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ToolError::invalid_arguments(format!("Invalid post ID: {}", raw)));
    }
    Ok(id.to_string())
}

/// Require a non-blank free-text argument.
pub fn require_text(field: &str, raw: &str) -> Result<String, ToolError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(text.to_string())
}

/// Keep at most `max_chars` characters. Not word-boundary aware.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Convert Reddit's epoch-seconds float to ISO-8601 with millisecond precision.
///
/// Returns `None` for values that do not map to a representable instant.
pub fn to_iso8601(epoch_secs: f64) -> Option<String> {
    let millis = (epoch_secs * 1000.0).round();
    if !millis.is_finite() || millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Turn a relative permalink into a full URL.
pub fn full_permalink(permalink: Option<&str>) -> Option<String> {
    permalink.map(|p| format!("{}{}", PERMALINK_HOST, p))
}

/// Deserialize tool arguments, reporting failures as `invalid_params`.
pub fn parse_params<T: DeserializeOwned>(args: JsonObject) -> Result<T, McpError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result: `text` is rendered as pretty JSON for the agent,
/// `structured` is attached as structured content.
pub fn structured_result<T, S>(text: &T, structured: &S) -> CallToolResult
where
    T: Serialize + ?Sized,
    S: Serialize,
{
    let rendered = match serde_json::to_string_pretty(text) {
        Ok(rendered) => rendered,
        Err(e) => return error_result(&format!("Failed to render result: {}", e)),
    };

    match serde_json::to_value(structured) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(rendered)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize structured content: {}", e);
            // Fallback to text-only
            CallToolResult::success(vec![Content::text(rendered)])
        }
    }
}
