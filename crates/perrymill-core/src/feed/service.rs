use super::fetcher::FeedFetcher;
use super::models::FeedResult;
use super::normalizer::normalize_entry;
use super::parser::parse_feed;
use crate::config::AppConfig;
use crate::Result;

/// Combined feed used when no URL is supplied
pub const DEFAULT_FEED_URL: &str =
    "https://rss.feedspot.com/u/72252f9f2933826fe9d1a2da83d6122c/rss/rsscombiner";

/// Hard cap on entries per fetch
pub const MAX_ITEMS: usize = 100;

/// Orchestrates fetch, parse, normalize, and limit into a [`FeedResult`].
/// Stateless: every call is independent.
pub struct FeedService {
    fetcher: FeedFetcher,
}

impl FeedService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: FeedFetcher::new(config)?,
        })
    }

    /// Fetch `url` (the default combined feed when blank) and normalize up
    /// to `limit` entries. Parse failures surface as
    /// [`crate::Error::FeedParse`] with the cause embedded; transport errors
    /// pass through unmodified.
    pub async fn fetch_feed(&self, url: &str, limit: Option<i64>) -> Result<FeedResult> {
        let url = url.trim();
        let url = if url.is_empty() { DEFAULT_FEED_URL } else { url };

        let content = self.fetcher.fetch(url).await?;
        build_feed_result(url, &content, limit)
    }
}

/// The deterministic half of a fetch: parse, normalize, and limit already
/// retrieved bytes.
pub fn build_feed_result(url: &str, content: &[u8], limit: Option<i64>) -> Result<FeedResult> {
    let parsed = parse_feed(content)?;

    let feed_title = parsed
        .title
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "RSS Feed".to_string());
    let feed_link = parsed
        .link
        .filter(|link| !link.is_empty())
        .unwrap_or_else(|| url.to_string());

    let entries = parsed
        .entries
        .iter()
        .take(effective_limit(limit))
        .map(normalize_entry)
        .collect();

    Ok(FeedResult {
        feed_title,
        feed_link,
        entries,
    })
}

/// Unusable or non-positive limits fall back to the cap; anything else is
/// clamped to it.
fn effective_limit(limit: Option<i64>) -> usize {
    match limit {
        Some(requested) if requested > 0 => (requested as usize).min(MAX_ITEMS),
        _ => MAX_ITEMS,
    }
}
