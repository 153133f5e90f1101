//! Comment capture
//!
//! Comments are not part of the value tree; they are recorded against the
//! path of the node they precede (or trail, for inline comments). The
//! serializers do not re-emit them — comment preservation through an
//! edit/save cycle is an accepted limitation of the semantic round trip.

use indexmap::IndexMap;

/// Mapping from a node path to the comment text attached to it.
///
/// Paths use the same syntax as [`crate::path::parse_path`]: dot-separated
/// map keys with `key[index]` for array elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentMap {
    entries: IndexMap<String, String>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a comment to a path. A second attach to the same path
    /// space-joins onto the existing text.
    pub fn attach(&mut self, path: impl Into<String>, comment: impl Into<String>) {
        let comment = comment.into();
        if comment.is_empty() {
            return;
        }
        self.entries
            .entry(path.into())
            .and_modify(|existing| {
                existing.push(' ');
                existing.push_str(&comment);
            })
            .or_insert(comment);
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Pending-comment state machine shared by the line-oriented parsers.
///
/// Consecutive comment lines accumulate into one space-joined string; a
/// blank line discards the accumulation; the parser takes the buffer when
/// it reaches the key or section the comment belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentAccumulator {
    state: State,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum State {
    #[default]
    Default,
    Accumulating(String),
}

impl CommentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the text of a comment line (marker and surrounding whitespace
    /// already stripped).
    pub fn comment_line(&mut self, text: &str) {
        let text = text.trim();
        match &mut self.state {
            State::Default => self.state = State::Accumulating(text.to_string()),
            State::Accumulating(buf) => {
                if !text.is_empty() {
                    if !buf.is_empty() {
                        buf.push(' ');
                    }
                    buf.push_str(text);
                }
            }
        }
    }

    /// A blank line breaks the association with whatever follows.
    pub fn blank_line(&mut self) {
        self.state = State::Default;
    }

    /// Take the accumulated comment, resetting to `Default`.
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            State::Default => None,
            State::Accumulating(buf) => {
                if buf.is_empty() {
                    None
                } else {
                    Some(buf)
                }
            }
        }
    }

    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accumulator_joins_consecutive_lines() {
        let mut acc = CommentAccumulator::new();
        acc.comment_line("max players");
        acc.comment_line("allowed");
        assert_eq!(acc.take(), Some("max players allowed".to_string()));
        // take() resets the state
        assert_eq!(acc.take(), None);
    }

    #[test]
    fn test_accumulator_blank_line_resets() {
        let mut acc = CommentAccumulator::new();
        acc.comment_line("orphaned header comment");
        acc.blank_line();
        assert_eq!(acc.take(), None);
        assert!(!acc.is_accumulating());
    }

    #[test]
    fn test_accumulator_empty_comment_lines() {
        let mut acc = CommentAccumulator::new();
        acc.comment_line("");
        // A bare "#" line keeps the machine accumulating but adds no text.
        assert!(acc.is_accumulating());
        acc.comment_line("actual text");
        assert_eq!(acc.take(), Some("actual text".to_string()));
    }

    #[test]
    fn test_comment_map_attach_and_get() {
        let mut comments = CommentMap::new();
        comments.attach("server.max-players", "max players allowed");
        assert_eq!(comments.get("server.max-players"), Some("max players allowed"));
        assert_eq!(comments.get("server"), None);
    }

    #[test]
    fn test_comment_map_joins_double_attach() {
        let mut comments = CommentMap::new();
        comments.attach("key", "pending part");
        comments.attach("key", "trailing part");
        assert_eq!(comments.get("key"), Some("pending part trailing part"));
    }
}
