//! Match highlighting for result presentation.

use std::ops::Range;

/// Byte ranges of `text` that match `term`, case-insensitively.
///
/// Ranges are non-overlapping, in order, and always fall on character
/// boundaries of the original text, even when lowercasing changes a
/// character's byte length.
#[must_use]
pub fn highlight_ranges(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    // For every byte of the lowered text, the original char it came from.
    let mut lowered = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            origin.extend(std::iter::repeat((start, ch.len_utf8())).take(lower.len_utf8()));
        }
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (at, matched) in lowered.match_indices(&needle) {
        let (start, _) = origin[at];
        let (last_start, last_len) = origin[at + matched.len() - 1];
        let end = last_start + last_len;

        match ranges.last_mut() {
            Some(prev) if prev.end > start => prev.end = prev.end.max(end),
            _ => ranges.push(start..end),
        }
    }
    ranges
}

/// Wrap every match of `term` in `open`/`close` markers.
#[must_use]
pub fn highlight(text: &str, term: &str, open: &str, close: &str) -> String {
    let ranges = highlight_ranges(text, term);
    if ranges.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for range in ranges {
        out.push_str(&text[cursor..range.start]);
        out.push_str(open);
        out.push_str(&text[range.clone()]);
        out.push_str(close);
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_case_insensitive() {
        assert_eq!(highlight_ranges("Claude Monet", "monet"), vec![7..12]);
        assert_eq!(highlight_ranges("monet MONET", "Monet"), vec![0..5, 6..11]);
    }

    #[test]
    fn test_no_match_or_empty_term() {
        assert!(highlight_ranges("Degas", "monet").is_empty());
        assert!(highlight_ranges("Degas", "  ").is_empty());
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Café Renoir";
        let ranges = highlight_ranges(text, "CAFÉ");
        assert_eq!(ranges, vec![0..5]);
        assert_eq!(&text[ranges[0].clone()], "Café");
    }

    #[test]
    fn test_lowercase_length_change() {
        // 'İ' lowercases to two chars
        let text = "İzmir";
        let ranges = highlight_ranges(text, "zmir");
        assert_eq!(&text[ranges[0].clone()], "zmir");
    }

    #[test]
    fn test_highlight_markers() {
        assert_eq!(
            highlight("Water Lilies by Monet", "lil", "[", "]"),
            "Water [Lil]ies by Monet"
        );
        assert_eq!(highlight("Degas", "monet", "[", "]"), "Degas");
    }
}
