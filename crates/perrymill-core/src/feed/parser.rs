use chrono::{DateTime, Datelike, Timelike, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use serde_json::{json, Map, Value};

use super::raw::RawEntry;
use crate::{Error, Result};

/// Feed-level data plus the raw entries awaiting normalization
#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub link: Option<String>,
    pub entries: Vec<RawEntry>,
}

/// Parse RSS/Atom content into a [`ParsedFeed`].
///
/// A document the parser cannot make sense of at all surfaces as
/// [`Error::FeedParse`] carrying the underlying cause text; recoverable
/// irregularities inside individual entries are left for the normalizer's
/// fallbacks.
pub fn parse_feed(content: &[u8]) -> Result<ParsedFeed> {
    let feed = parser::parse(content).map_err(|e| Error::FeedParse(e.to_string()))?;

    let title = feed.title.map(|t| t.content);
    let link = feed.links.first().map(|l| l.href.clone());
    let entries = feed.entries.into_iter().map(raw_entry).collect();

    Ok(ParsedFeed {
        title,
        link,
        entries,
    })
}

/// Flatten a typed feed-rs entry into the loose mapping the normalizer
/// consumes. Absent fields stay absent; the normalizer owns all fallbacks.
fn raw_entry(entry: Entry) -> RawEntry {
    let mut map = Map::new();

    if let Some(title) = entry.title {
        map.insert("title".to_string(), json!(title.content));
    }

    if let Some(link) = entry.links.first() {
        map.insert("link".to_string(), json!(link.href));
    }
    if !entry.links.is_empty() {
        let links: Vec<Value> = entry
            .links
            .iter()
            .map(|link| {
                json!({
                    "href": link.href,
                    "type": link.media_type.clone().unwrap_or_default(),
                })
            })
            .collect();
        map.insert("links".to_string(), Value::Array(links));
    }

    if let Some(summary) = entry.summary {
        map.insert("summary".to_string(), json!(summary.content));
    }
    if let Some(body) = entry.content.and_then(|content| content.body) {
        map.insert("summary_detail".to_string(), json!({ "value": body }));
    }

    let media_content: Vec<Value> = entry
        .media
        .iter()
        .flat_map(|media| media.content.iter())
        .filter_map(|content| content.url.as_ref())
        .map(|url| json!({ "url": url.to_string() }))
        .collect();
    if !media_content.is_empty() {
        map.insert("media_content".to_string(), Value::Array(media_content));
    }

    let thumbnails: Vec<Value> = entry
        .media
        .iter()
        .flat_map(|media| media.thumbnails.iter())
        .map(|thumb| json!({ "url": thumb.image.uri }))
        .collect();
    if !thumbnails.is_empty() {
        map.insert("media_thumbnail".to_string(), Value::Array(thumbnails));
    }

    if let Some(published) = entry.published {
        map.insert("published_parsed".to_string(), time_components(published));
    }
    if let Some(updated) = entry.updated {
        map.insert("updated_parsed".to_string(), time_components(updated));
    }

    if let Some(source) = entry.source.filter(|s| !s.trim().is_empty()) {
        map.insert("source".to_string(), json!({ "title": source }));
    }

    RawEntry::from_map(map)
}

/// Six naive components in feed order: year, month, day, hour, minute,
/// second. Timezone handling already happened in feed-rs; the components are
/// carried as-is.
fn time_components(datetime: DateTime<Utc>) -> Value {
    json!([
        datetime.year(),
        datetime.month(),
        datetime.day(),
        datetime.hour(),
        datetime.minute(),
        datetime.second(),
    ])
}
