//! Unified document type

use crate::comment::CommentMap;
use crate::error::{Error, Result};
use crate::format::{handler_for, Format, ParsedConfig};
use crate::path::{get_at_path, parse_path};
use crate::value::ConfigValue;

/// A parsed config document: format tag, value tree, and captured comments.
///
/// The tree is created fresh on each parse and discarded when the user
/// moves to another file; edits replace the root wholesale (see
/// `modcfg-edit`), after which [`Document::serialize`] produces the text
/// to save.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    format: Format,
    root: ConfigValue,
    comments: CommentMap,
}

impl Document {
    /// Parse with an explicit format.
    ///
    /// [`Format::Text`] has no structural handler and is an error here;
    /// callers keep such files in raw-text mode instead.
    pub fn parse_as(source: &str, format: Format) -> Result<Self> {
        let handler = handler_for(format)
            .ok_or_else(|| Error::UnsupportedFormat(format.name().to_string()))?;
        let ParsedConfig { root, comments } = handler.parse(source)?;
        Ok(Self {
            format,
            root,
            comments,
        })
    }

    /// Detect the format from the filename, then parse.
    pub fn parse_named(filename: &str, source: &str) -> Result<Self> {
        Self::parse_as(source, Format::from_filename(filename))
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn root(&self) -> &ConfigValue {
        &self.root
    }

    pub fn comments(&self) -> &CommentMap {
        &self.comments
    }

    /// Comment attached to a node path, if any.
    pub fn comment(&self, path: &str) -> Option<&str> {
        self.comments.get(path)
    }

    /// Get the node at a dot/bracket path.
    ///
    /// # Examples
    ///
    /// ```
    /// use modcfg_content::{ConfigValue, Document, Format};
    ///
    /// let doc = Document::parse_as("[server]\nmax-players = 20\n", Format::Toml).unwrap();
    /// assert_eq!(
    ///     doc.get_path("server.max-players"),
    ///     Some(&ConfigValue::Number(20.0))
    /// );
    /// assert_eq!(doc.get_path("server.missing"), None);
    /// ```
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        get_at_path(&self.root, &parse_path(path))
    }

    /// Replace the tree with an edited root. Comments keep their paths;
    /// a comment whose node was deleted simply stops resolving.
    pub fn replace_root(&mut self, root: ConfigValue) {
        self.root = root;
    }

    /// Take the root, leaving the document empty. Used by edit flows that
    /// feed the root through a pure transformation and put it back.
    pub fn take_root(&mut self) -> ConfigValue {
        std::mem::take(&mut self.root)
    }

    /// Serialize the current tree back to format-correct text.
    pub fn serialize(&self) -> Result<String> {
        let handler = handler_for(self.format)
            .ok_or_else(|| Error::UnsupportedFormat(self.format.name().to_string()))?;
        handler.serialize(&self.root)
    }
}
