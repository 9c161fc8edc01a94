//! Wire models for the Reddit JSON API.
//!
//! Only the envelope (`Thing`, `Listing`) is mandatory. Every field inside a
//! thing's `data` is optional and defaults to `None` when absent or `null`, so
//! a sparse post never fails a whole listing.

use serde::Deserialize;

/// Kind tag of a comment thing.
pub const KIND_COMMENT: &str = "t1";

/// Kind tag of a subreddit thing.
pub const KIND_SUBREDDIT: &str = "t5";

/// A typed wrapper around any Reddit object (`{"kind": ..., "data": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct Thing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

/// A page of things.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData<T> {
    pub children: Vec<Thing<T>>,
}

impl<T> Listing<T> {
    /// Consume the listing, yielding the `data` of each child in order.
    pub fn into_items(self) -> impl Iterator<Item = T> {
        self.data.children.into_iter().map(|child| child.data)
    }
}

/// A link (post), kind `t3`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPost {
    pub title: Option<String>,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub url: Option<String>,
    pub selftext: Option<String>,
    pub num_comments: Option<i64>,
    pub created_utc: Option<f64>,
    pub permalink: Option<String>,
    pub subreddit: Option<String>,
}

/// A comment, kind `t1`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawComment {
    pub author: Option<String>,
    pub score: Option<i64>,
    pub body: Option<String>,
    pub created_utc: Option<f64>,
}

/// Subreddit metadata, kind `t5`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSubreddit {
    pub display_name: Option<String>,
    pub title: Option<String>,
    pub public_description: Option<String>,
    pub subscribers: Option<u64>,
    pub accounts_active: Option<u64>,
    pub created_utc: Option<f64>,
    pub over18: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_post_deserializes() {
        let listing: Listing<RawPost> = serde_json::from_value(json!({
            "kind": "Listing",
            "data": { "children": [ { "kind": "t3", "data": { "title": "only a title" } } ] }
        }))
        .unwrap();

        let posts: Vec<_> = listing.into_items().collect();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title.as_deref(), Some("only a title"));
        assert!(posts[0].selftext.is_none());
        assert!(posts[0].created_utc.is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let sub: Thing<RawSubreddit> = serde_json::from_value(json!({
            "kind": "t5",
            "data": { "display_name": "rust", "accounts_active": null }
        }))
        .unwrap();
        assert_eq!(sub.kind, "t5");
        assert_eq!(sub.data.display_name.as_deref(), Some("rust"));
        assert!(sub.data.accounts_active.is_none());
    }

    #[test]
    fn test_listing_without_children_is_rejected() {
        let result: Result<Listing<RawPost>, _> =
            serde_json::from_value(json!({ "kind": "Listing", "data": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_integer_timestamp_accepted() {
        let comment: RawComment =
            serde_json::from_value(json!({ "created_utc": 1700000000 })).unwrap();
        assert_eq!(comment.created_utc, Some(1_700_000_000.0));
    }
}
