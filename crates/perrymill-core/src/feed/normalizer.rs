//! Converts loosely-typed raw entries into the canonical [`FeedEntry`].
//!
//! Real-world feeds omit, duplicate, and mangle fields in every way
//! imaginable, so every resolution step here terminates in a documented
//! fallback (empty string or `None`) instead of an error. Normalization is a
//! pure function of its input and never fails.

use serde_json::Value;
use url::Url;

use super::html;
use super::models::FeedEntry;
use super::raw::RawEntry;

/// Maximum visible subtitle length, including the truncation marker
const SUBTITLE_MAX_CHARS: usize = 160;
/// Characters kept before appending the ellipsis
const SUBTITLE_TRUNCATE_AT: usize = 157;
const ELLIPSIS: char = '\u{2026}';

/// Normalize one raw entry. Total over all inputs, including the empty
/// mapping.
pub fn normalize_entry(entry: &RawEntry) -> FeedEntry {
    let title = entry.string("title").unwrap_or("").trim().to_string();
    let link = entry.string("link").unwrap_or("").trim().to_string();

    let summary = html::extract_text(summary_html(entry).unwrap_or(""));

    let published = entry
        .time_parts("published_parsed")
        .or_else(|| entry.time_parts("updated_parsed"))
        .and_then(format_timestamp);

    let source = resolve_source(entry, &link);
    let image = discover_image(entry);
    let subtitle = derive_subtitle(entry, &summary);

    FeedEntry {
        title,
        summary,
        link,
        published,
        source,
        subtitle,
        image,
    }
}

/// Raw summary HTML; some producers use `description` instead
fn summary_html(entry: &RawEntry) -> Option<&str> {
    entry
        .string("summary")
        .or_else(|| entry.string("description"))
}

/// Render six naive time components as ISO-8601 without a timezone offset.
/// The components are taken at face value; out-of-range values yield `None`.
fn format_timestamp(parts: [i64; 6]) -> Option<String> {
    let [year, month, day, hour, minute, second] = parts;

    let date = chrono::NaiveDate::from_ymd_opt(
        year.try_into().ok()?,
        month.try_into().ok()?,
        day.try_into().ok()?,
    )?;
    let datetime = date.and_hms_opt(
        hour.try_into().ok()?,
        minute.try_into().ok()?,
        second.try_into().ok()?,
    )?;

    Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Attribution: explicit source title first, then the link's hostname
fn resolve_source(entry: &RawEntry, link: &str) -> Option<String> {
    let explicit = entry
        .object("source")
        .and_then(|source| source.get("title"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string);

    if explicit.is_some() {
        return explicit;
    }

    if link.is_empty() {
        return None;
    }

    Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
}

/// Best-effort media URL, first match wins:
/// media content, media thumbnail, image-typed link, `<img>` in the summary
/// detail HTML, `<img>` in the summary itself.
fn discover_image(entry: &RawEntry) -> Option<String> {
    if let Some(url) = first_attachment_url(entry, "media_content") {
        return Some(url);
    }
    if let Some(url) = first_attachment_url(entry, "media_thumbnail") {
        return Some(url);
    }

    if let Some(links) = entry.list("links") {
        for link in links.iter().filter_map(Value::as_object) {
            let is_image = link
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|media_type| media_type.starts_with("image"));
            if !is_image {
                continue;
            }
            if let Some(href) = non_empty_str(link.get("href")) {
                return Some(href.to_string());
            }
        }
    }

    if let Some(detail_html) = summary_detail_html(entry) {
        if let Some(src) = html::first_image_src(detail_html) {
            return Some(src);
        }
    }

    html::first_image_src(summary_html(entry)?)
}

/// First usable URL in a media attachment list; `url` preferred over `href`
fn first_attachment_url(entry: &RawEntry, key: &str) -> Option<String> {
    entry
        .list(key)?
        .iter()
        .filter_map(Value::as_object)
        .find_map(|item| {
            non_empty_str(item.get("url"))
                .or_else(|| non_empty_str(item.get("href")))
                .map(str::to_string)
        })
}

fn summary_detail_html(entry: &RawEntry) -> Option<&str> {
    entry
        .object("summary_detail")
        .and_then(|detail| detail.get("value"))
        .and_then(Value::as_str)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Short teaser: explicit subtitle, else summary-detail text, else the plain
/// summary; first sentence only, trimmed and length-bounded.
fn derive_subtitle(entry: &RawEntry, summary_text: &str) -> Option<String> {
    let candidate = entry
        .string("subtitle")
        .map(html::extract_text)
        .filter(|text| !text.is_empty())
        .or_else(|| {
            summary_detail_html(entry)
                .map(html::extract_text)
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_else(|| summary_text.to_string());

    let trimmed = first_sentence(&candidate).trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().count() > SUBTITLE_MAX_CHARS {
        let cut: String = trimmed.chars().take(SUBTITLE_TRUNCATE_AT).collect();
        let mut shortened = cut.trim_end().to_string();
        shortened.push(ELLIPSIS);
        return Some(shortened);
    }

    Some(trimmed.to_string())
}

/// Everything up to and including the first `.` that is followed by
/// whitespace; the whole text when no such boundary exists.
fn first_sentence(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch != '.' {
            continue;
        }
        if let Some((_, next)) = chars.peek() {
            if next.is_whitespace() {
                return &text[..=idx];
            }
        }
    }
    text
}
