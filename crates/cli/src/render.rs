//! Search result rendering

use artmarket_search::{highlight_ranges, MatchRecord};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Render one artwork as a short block of lines.
///
/// Matches of the first term that occurs in a field are highlighted when
/// `color` is set; pass the typed term first, then any variants that matched.
pub fn render_record(record: &MatchRecord, terms: &[String], color: bool) -> String {
    let mut out = String::new();

    let title = emphasise(&record.title, terms, color);
    let _ = writeln!(out, "{}", if color { title.bold().to_string() } else { title });

    let mut details = Vec::new();
    if let Some(ref artist) = record.artist_name {
        details.push(format!("by {}", emphasise(artist, terms, color)));
    }
    if let Some(ref category) = record.category {
        details.push(format!("[{category}]"));
    }
    if let Some(ref location) = record.location {
        details.push(location.clone());
    }
    if !details.is_empty() {
        let _ = writeln!(out, "  {}", details.join("  "));
    }

    if let Some(url) = record.primary_image() {
        let _ = writeln!(out, "  {}", if color { url.dimmed().to_string() } else { url.to_string() });
    }
    out
}

/// Highlight matches of the first term found in `text`.
fn emphasise(text: &str, terms: &[String], color: bool) -> String {
    if !color {
        return text.to_string();
    }

    let Some(ranges) = terms
        .iter()
        .map(|term| highlight_ranges(text, term))
        .find(|ranges| !ranges.is_empty())
    else {
        return text.to_string();
    };

    let mut out = String::with_capacity(text.len() + ranges.len() * 16);
    let mut cursor = 0;
    for range in ranges {
        out.push_str(&text[cursor..range.start]);
        let _ = write!(out, "{}", (&text[range.clone()]).yellow().underline());
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MatchRecord {
        serde_json::from_value(serde_json::json!({
            "id": "a1",
            "title": "Water Lilies",
            "artist_name": "Claude Monet",
            "category": "paintings",
            "status": "approved",
            "created_at": "2024-03-01T00:00:00Z",
            "artwork_images": [{"image_url": "https://cdn.example/a1.jpg"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_plain_rendering() {
        let out = render_record(&record(), &["monet".to_string()], false);
        assert_eq!(
            out,
            "Water Lilies\n  by Claude Monet  [paintings]\n  https://cdn.example/a1.jpg\n"
        );
    }

    #[test]
    fn test_highlight_uses_first_matching_term() {
        let terms = vec!["monett".to_string(), "monet".to_string()];
        let out = emphasise("Claude Monet", &terms, true);

        assert!(out.starts_with("Claude "));
        assert!(out.contains("Monet"));
        assert_ne!(out, "Claude Monet");
    }

    #[test]
    fn test_no_match_leaves_text() {
        assert_eq!(emphasise("Sunrise", &["xyz".to_string()], true), "Sunrise");
    }
}
