//! Java-style .properties / .cfg format handler
//!
//! Flat key/value lines with `#` or `!` comments. The separator is
//! whichever of `=` / `:` occurs first in the line. Values are scalars
//! only; there is no nesting.

use super::scalar::{decode_scalar, encode_number, looks_like_number, quote_double};
use crate::comment::{CommentAccumulator, CommentMap};
use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler, ParsedConfig};
use crate::value::{ConfigMap, ConfigValue};

/// Handler for Properties files
#[derive(Debug, Default)]
pub struct PropertiesHandler;

impl PropertiesHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Position of the separator: the first `=` or `:`, whichever comes first.
fn find_separator(line: &str) -> Option<usize> {
    let eq = line.find('=');
    let colon = line.find(':');
    match (eq, colon) {
        (Some(e), Some(c)) => Some(e.min(c)),
        (Some(e), None) => Some(e),
        (None, Some(c)) => Some(c),
        (None, None) => None,
    }
}

/// A string that would re-decode as bool/number (or lose its padding)
/// must be written quoted.
fn encode_string(s: &str) -> String {
    if s == "true"
        || s == "false"
        || looks_like_number(s)
        || s.starts_with('"')
        || s.starts_with('\'')
        || s.trim() != s
    {
        quote_double(s)
    } else {
        s.to_string()
    }
}

impl FormatHandler for PropertiesHandler {
    fn format(&self) -> Format {
        Format::Properties
    }

    fn parse(&self, source: &str) -> Result<ParsedConfig> {
        let mut root = ConfigMap::new();
        let mut comments = CommentMap::new();
        let mut acc = CommentAccumulator::new();

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                acc.blank_line();
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix('#').or_else(|| trimmed.strip_prefix('!')) {
                acc.comment_line(rest);
                continue;
            }
            let Some(pos) = find_separator(trimmed) else {
                // Key-only line without separator: nothing to record.
                continue;
            };
            let key = trimmed[..pos].trim().to_string();
            if key.is_empty() {
                continue;
            }
            let value = decode_scalar(trimmed[pos + 1..].trim());
            if let Some(comment) = acc.take() {
                comments.attach(key.clone(), comment);
            }
            root.insert(key, value);
        }

        Ok(ParsedConfig {
            root: ConfigValue::Map(root),
            comments,
        })
    }

    fn serialize(&self, root: &ConfigValue) -> Result<String> {
        let map = root
            .as_map()
            .ok_or_else(|| Error::unsupported("Properties", "document root must be a map"))?;
        let mut out = String::new();
        for (key, value) in map {
            let encoded = match value {
                ConfigValue::Bool(b) => b.to_string(),
                ConfigValue::Number(n) => encode_number(*n),
                ConfigValue::String(s) => encode_string(s),
                ConfigValue::Null | ConfigValue::Array(_) | ConfigValue::Map(_) => {
                    return Err(Error::unsupported(
                        "Properties",
                        format!("value for `{key}` is not a scalar"),
                    ));
                }
            };
            out.push_str(key);
            out.push('=');
            out.push_str(&encoded);
            out.push('\n');
        }
        Ok(out)
    }
}
