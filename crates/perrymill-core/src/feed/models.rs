use serde::{Deserialize, Serialize};

/// One normalized feed item. Every field is always serialized; optional
/// fields serialize as null rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    /// Plain text, HTML stripped
    pub summary: String,
    pub link: String,
    /// Naive ISO-8601 local timestamp, no timezone offset
    pub published: Option<String>,
    /// Attribution name or link hostname
    pub source: Option<String>,
    /// Short teaser, at most 160 characters after truncation
    pub subtitle: Option<String>,
    /// Best-effort discovered media URL
    pub image: Option<String>,
}

/// A fetched feed after normalization, in source order and truncated to the
/// requested limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResult {
    pub feed_title: String,
    pub feed_link: String,
    #[serde(default)]
    pub entries: Vec<FeedEntry>,
}
