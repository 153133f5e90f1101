//! Parse memoization
//!
//! Parsing is pure and may be re-run on every keystroke; the cache keys
//! the last result by (text, format) so a re-render of unchanged text
//! costs a string compare, not a parse. Failures are memoized too — a
//! malformed document should not be re-parsed on every redraw either.

use modcfg_content::{Document, Format};

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    format: Format,
    /// `None` records a parse failure.
    document: Option<Document>,
}

/// Single-slot memo for the one active document of a session.
#[derive(Debug, Clone, Default)]
pub struct ParseCache {
    last: Option<Entry>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` as `format`, reusing the memoized outcome when both
    /// match the previous call. `None` means the parse failed.
    pub fn parse(&mut self, text: &str, format: Format) -> Option<Document> {
        if let Some(entry) = &self.last {
            if entry.format == format && entry.text == text {
                return entry.document.clone();
            }
        }
        let document = Document::parse_as(text, format).ok();
        self.last = Some(Entry {
            text: text.to_string(),
            format,
            document: document.clone(),
        });
        document
    }

    /// Drop the memo (used when the session moves to another file).
    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_on_same_text_and_format() {
        let mut cache = ParseCache::new();
        let first = cache.parse("key = 1\n", Format::Toml).unwrap();
        let second = cache.parse("key = 1\n", Format::Toml).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_miss_on_format_change() {
        let mut cache = ParseCache::new();
        // The same bytes parse differently per format
        let toml = cache.parse("key = 1\n", Format::Toml).unwrap();
        let props = cache.parse("key = 1\n", Format::Properties).unwrap();
        assert_eq!(toml.format(), Format::Toml);
        assert_eq!(props.format(), Format::Properties);
    }

    #[test]
    fn test_cache_memoizes_failures() {
        let mut cache = ParseCache::new();
        assert!(cache.parse("{ not json", Format::Json).is_none());
        assert!(cache.parse("{ not json", Format::Json).is_none());
    }
}
