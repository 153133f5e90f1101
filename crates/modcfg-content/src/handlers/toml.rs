//! TOML format handler
//!
//! A hand-written line scanner rather than a full TOML implementation:
//! comment attachment to node paths is the point, and the subset covers
//! what mod configs actually use. Array-of-tables, inline tables, and
//! multi-line values are not supported; a line that fits no rule fails
//! the parse, which degrades the document to raw-text editing instead of
//! silently dropping content.

use super::scalar::{
    decode_scalar, encode_number, find_unquoted, quote_double, split_once_unquoted,
    split_top_level,
};
use crate::comment::{CommentAccumulator, CommentMap};
use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler, ParsedConfig};
use crate::path::join_key;
use crate::value::{ConfigMap, ConfigValue};

/// Handler for TOML files
#[derive(Debug, Default)]
pub struct TomlHandler;

impl TomlHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Walk/create nested maps for each segment, returning the deepest map.
/// A scalar squatting on a segment is replaced by a map.
fn ensure_section<'a>(root: &'a mut ConfigMap, path: &[String]) -> &'a mut ConfigMap {
    let mut current = root;
    for segment in path {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(ConfigValue::empty_map);
        if slot.as_map().is_none() {
            *slot = ConfigValue::empty_map();
        }
        current = match slot {
            ConfigValue::Map(map) => map,
            _ => unreachable!("slot was just normalized to a map"),
        };
    }
    current
}

fn decode_value(raw: &str) -> ConfigValue {
    let raw = raw.trim();
    if raw.starts_with('[') && raw.ends_with(']') && raw.len() >= 2 {
        let inner = raw[1..raw.len() - 1].trim();
        if inner.is_empty() {
            return ConfigValue::Array(Vec::new());
        }
        return ConfigValue::Array(split_top_level(inner).iter().map(|e| decode_value(e)).collect());
    }
    decode_scalar(raw)
}

fn encode_value(value: &ConfigValue) -> Result<String> {
    match value {
        ConfigValue::Bool(b) => Ok(b.to_string()),
        ConfigValue::Number(n) => Ok(encode_number(*n)),
        ConfigValue::String(s) => Ok(quote_double(s)),
        ConfigValue::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    ConfigValue::Map(_) => {
                        Err(Error::unsupported("TOML", "array-of-tables is not supported"))
                    }
                    other => encode_value(other),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", parts.join(", ")))
        }
        ConfigValue::Null => Err(Error::unsupported("TOML", "null has no representation")),
        ConfigValue::Map(_) => Err(Error::unsupported("TOML", "inline tables are not supported")),
    }
}

fn write_table(out: &mut String, path: &str, map: &ConfigMap) -> Result<()> {
    // Scalar entries first, then each nested map as its own block.
    for (key, value) in map {
        if !matches!(value, ConfigValue::Map(_)) {
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(&encode_value(value)?);
            out.push('\n');
        }
    }
    for (key, value) in map {
        if let ConfigValue::Map(child) = value {
            let child_path = join_key(path, key);
            out.push('\n');
            out.push('[');
            out.push_str(&child_path);
            out.push_str("]\n");
            write_table(out, &child_path, child)?;
        }
    }
    Ok(())
}

impl FormatHandler for TomlHandler {
    fn format(&self) -> Format {
        Format::Toml
    }

    fn parse(&self, source: &str) -> Result<ParsedConfig> {
        let mut root = ConfigMap::new();
        let mut comments = CommentMap::new();
        let mut acc = CommentAccumulator::new();
        let mut section: Vec<String> = Vec::new();

        for (lineno, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                acc.blank_line();
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix('#') {
                acc.comment_line(rest);
                continue;
            }
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                let name = &trimmed[1..trimmed.len() - 1];
                if name.starts_with('[') {
                    return Err(Error::parse(
                        "TOML",
                        format!("array-of-tables is not supported (line {})", lineno + 1),
                    ));
                }
                section = name
                    .split('.')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                ensure_section(&mut root, &section);
                if let Some(comment) = acc.take() {
                    comments.attach(section.join("."), comment);
                }
                continue;
            }
            if let Some((key_part, value_part)) = split_once_unquoted(trimmed, '=') {
                let key = key_part.trim().to_string();
                if key.is_empty() {
                    return Err(Error::parse("TOML", format!("empty key on line {}", lineno + 1)));
                }
                let (value_raw, trailing) = match find_unquoted(value_part, '#') {
                    Some(pos) => (
                        value_part[..pos].trim(),
                        Some(value_part[pos + 1..].trim().to_string()),
                    ),
                    None => (value_part.trim(), None),
                };
                let value = decode_value(value_raw);
                ensure_section(&mut root, &section).insert(key.clone(), value);

                let mut comment = acc.take();
                if let Some(trailing) = trailing.filter(|t| !t.is_empty()) {
                    comment = Some(match comment {
                        Some(pending) => format!("{pending} {trailing}"),
                        None => trailing,
                    });
                }
                if let Some(comment) = comment {
                    comments.attach(join_key(&section.join("."), &key), comment);
                }
                continue;
            }
            return Err(Error::parse(
                "TOML",
                format!("unrecognized content on line {}: {trimmed}", lineno + 1),
            ));
        }

        Ok(ParsedConfig {
            root: ConfigValue::Map(root),
            comments,
        })
    }

    fn serialize(&self, root: &ConfigValue) -> Result<String> {
        let map = root
            .as_map()
            .ok_or_else(|| Error::unsupported("TOML", "document root must be a map"))?;
        let mut out = String::new();
        write_table(&mut out, "", map)?;
        Ok(out)
    }
}
