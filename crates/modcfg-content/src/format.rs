//! Format detection and the handler trait

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::comment::CommentMap;
use crate::error::Result;
use crate::value::ConfigValue;

/// Supported config document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Json,
    Toml,
    Yaml,
    Properties,
    /// Anything unrecognized. No structural parse is attempted; only
    /// raw-text editing is offered for these files.
    Text,
}

impl Format {
    /// Detect format from a filename or path.
    ///
    /// Extension match is case-insensitive; files without a recognized
    /// extension are `Text`.
    pub fn from_filename(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" | "json5" => Self::Json,
            "toml" => Self::Toml,
            "yml" | "yaml" => Self::Yaml,
            "properties" | "cfg" => Self::Properties,
            _ => Self::Text,
        }
    }

    /// Get default file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json", "json5"],
            Self::Toml => &["toml"],
            Self::Yaml => &["yml", "yaml"],
            Self::Properties => &["properties", "cfg"],
            Self::Text => &[],
        }
    }

    /// Whether a structural parser/serializer exists for this format
    pub fn supports_structure(&self) -> bool {
        !matches!(self, Self::Text)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
            Self::Properties => "Properties",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of a structural parse: the value tree plus captured comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedConfig {
    pub root: ConfigValue,
    pub comments: CommentMap,
}

/// Trait for format-specific parse/serialize pairs.
///
/// Each handler is independent and stateless; a serializer mirrors its
/// parser's grammar so that `parse(serialize(tree))` is value-equal to
/// `tree` for every tree the parser can produce.
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Parse source text into a value tree and comment map
    fn parse(&self, source: &str) -> Result<ParsedConfig>;

    /// Serialize a value tree back to format-correct text
    fn serialize(&self, root: &ConfigValue) -> Result<String>;
}

/// Look up the handler for a format. `None` for [`Format::Text`].
pub fn handler_for(format: Format) -> Option<Box<dyn FormatHandler>> {
    use crate::handlers::{JsonHandler, PropertiesHandler, TomlHandler, YamlHandler};
    match format {
        Format::Json => Some(Box::new(JsonHandler::new())),
        Format::Toml => Some(Box::new(TomlHandler::new())),
        Format::Yaml => Some(Box::new(YamlHandler::new())),
        Format::Properties => Some(Box::new(PropertiesHandler::new())),
        Format::Text => None,
    }
}
