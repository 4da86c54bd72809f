//! HTML helpers backing the normalizer.
//!
//! These are the only two operations the pipeline needs from an HTML parser,
//! kept behind plain functions so the normalizer's control flow stays
//! independent of the parsing library.

use scraper::{Html, Selector};

/// Strip all markup from a fragment and collapse the remaining text into a
/// single space-joined string. Each text node is trimmed before joining, so
/// `<p>Summary <strong>content</strong>.</p>` becomes `Summary content .`.
/// Empty or whitespace-only input yields an empty string.
pub fn extract_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let pieces: Vec<&str> = fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();

    pieces.join(" ")
}

/// The `src` of the first `<img>` in a fragment, if the first image carries a
/// non-empty one.
pub fn first_image_src(html: &str) -> Option<String> {
    if html.trim().is_empty() {
        return None;
    }

    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse("img").ok()?;

    fragment
        .select(&selector)
        .next()?
        .value()
        .attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_joins_with_spaces() {
        let text = extract_text("<p>Summary <strong>content</strong>.</p>");
        assert_eq!(text, "Summary content .");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(extract_text("No markup here."), "No markup here.");
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("   \n  "), "");
        assert_eq!(extract_text("<p></p>"), "");
    }

    #[test]
    fn nested_markup_is_flattened() {
        let text = extract_text("<div><h1>Headline</h1><p>Body <em>text</em></p></div>");
        assert_eq!(text, "Headline Body text");
    }

    #[test]
    fn finds_first_image_src() {
        let html = r#"<p>Intro</p><img src="https://example.com/a.jpg"/><img src="https://example.com/b.jpg"/>"#;
        assert_eq!(
            first_image_src(html),
            Some("https://example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn single_quoted_src_is_found() {
        let html = "<img src='https://example.com/one.png' alt='x'>";
        assert_eq!(
            first_image_src(html),
            Some("https://example.com/one.png".to_string())
        );
    }

    #[test]
    fn missing_or_empty_src_yields_none() {
        assert_eq!(first_image_src("<p>no images</p>"), None);
        assert_eq!(first_image_src("<img alt=\"no src\">"), None);
        assert_eq!(first_image_src("<img src=\"\">"), None);
        assert_eq!(first_image_src(""), None);
    }
}
