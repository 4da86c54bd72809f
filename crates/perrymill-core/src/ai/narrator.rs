use serde::{Deserialize, Serialize};

use crate::feed::FeedResult;
use crate::Result;

/// Entries included in the narrative prompt
pub const PROMPT_ENTRY_LIMIT: usize = 15;

/// Generated digest narrative plus upstream token accounting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    pub narrative: String,
    pub usage: NarrativeUsage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Language-model collaborator that turns a normalized feed into prose
#[async_trait::async_trait]
pub trait NarrativeProvider: Send + Sync {
    async fn narrate(&self, feed: &FeedResult) -> Result<Narrative>;
}

/// Build the editorial prompt from up to [`PROMPT_ENTRY_LIMIT`] entries
pub fn build_prompt(feed: &FeedResult) -> String {
    let mut lines = Vec::new();
    for entry in feed.entries.iter().take(PROMPT_ENTRY_LIMIT) {
        let title = entry.title.trim();
        let summary = entry.summary.trim();
        let source = entry.source.as_deref().unwrap_or("Unknown source");
        let published = entry.published.as_deref().unwrap_or("Unknown");
        lines.push(format!(
            "Title: {title}\nSource: {source}\nPublished: {published}\nSummary: {summary}\n"
        ));
    }

    let joined = lines.join("\n");
    format!(
        "You are an editorial AI assistant summarizing the latest news items for a digest called 'Perry Mill'. \
        Write a concise narrative (3-5 paragraphs) highlighting the major themes, noteworthy events, and overall sentiment. \
        Tie related stories together, and mention sources when useful. Avoid bullet lists; respond with polished prose.\n\n\
        Stories:\n{joined}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedEntry;

    fn entry(title: &str) -> FeedEntry {
        FeedEntry {
            title: title.to_string(),
            summary: format!("Summary of {title}"),
            link: String::new(),
            published: Some("2024-07-04T10:30:00".to_string()),
            source: Some("Example Source".to_string()),
            subtitle: None,
            image: None,
        }
    }

    fn feed(count: usize) -> FeedResult {
        FeedResult {
            feed_title: "Sample Feed".to_string(),
            feed_link: "https://example.com/feed".to_string(),
            entries: (0..count).map(|i| entry(&format!("Story {i}"))).collect(),
        }
    }

    #[test]
    fn prompt_includes_entry_fields() {
        let prompt = build_prompt(&feed(1));
        assert!(prompt.contains("Perry Mill"));
        assert!(prompt.contains("Title: Story 0"));
        assert!(prompt.contains("Source: Example Source"));
        assert!(prompt.contains("Published: 2024-07-04T10:30:00"));
        assert!(prompt.contains("Summary: Summary of Story 0"));
    }

    #[test]
    fn prompt_caps_at_fifteen_entries() {
        let prompt = build_prompt(&feed(40));
        assert!(prompt.contains("Title: Story 14"));
        assert!(!prompt.contains("Title: Story 15"));
    }

    #[test]
    fn missing_attribution_uses_placeholders() {
        let mut digest = feed(1);
        digest.entries[0].source = None;
        digest.entries[0].published = None;

        let prompt = build_prompt(&digest);
        assert!(prompt.contains("Source: Unknown source"));
        assert!(prompt.contains("Published: Unknown"));
    }
}
