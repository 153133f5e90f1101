//! YAML format handler
//!
//! Indentation-stack parser over the mapping subset of YAML: nested maps,
//! inline flow arrays, and the usual scalar zoo (`yes`/`no`/`on`/`off`,
//! `~`). Block sequences fail the parse (degrading the file to raw-text
//! editing); block-scalar bodies after `|`/`>` are skipped, not captured.

use super::scalar::{
    encode_number, looks_like_number, quote_double, split_once_unquoted, split_top_level, unquote,
};
use crate::comment::{CommentAccumulator, CommentMap};
use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler, ParsedConfig};
use crate::value::{ConfigMap, ConfigValue};

/// Handler for YAML files
#[derive(Debug, Default)]
pub struct YamlHandler;

impl YamlHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Scalars that re-decode as something other than a plain string, and so
/// force quoting on output.
const KEYWORDS: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

fn decode_yaml_scalar(raw: &str) -> ConfigValue {
    match raw {
        "" | "null" | "~" => return ConfigValue::Null,
        "true" | "yes" | "on" => return ConfigValue::Bool(true),
        "false" | "no" | "off" => return ConfigValue::Bool(false),
        _ => {}
    }
    if let Some(s) = unquote(raw) {
        return ConfigValue::String(s);
    }
    if raw.starts_with('[') && raw.ends_with(']') && raw.len() >= 2 {
        let inner = raw[1..raw.len() - 1].trim();
        if inner.is_empty() {
            return ConfigValue::Array(Vec::new());
        }
        return ConfigValue::Array(
            split_top_level(inner)
                .iter()
                .map(|e| decode_yaml_scalar(e.trim()))
                .collect(),
        );
    }
    if let Ok(n) = raw.parse::<f64>() {
        return ConfigValue::Number(n);
    }
    ConfigValue::String(raw.to_string())
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || KEYWORDS.contains(&s)
        || s == "|"
        || s == ">"
        || looks_like_number(s)
        || s.starts_with('"')
        || s.starts_with('\'')
        || s.contains(':')
        || s.contains('#')
        || s.contains('\n')
        || s.contains(',')
        || s.contains('[')
        || s.contains(']')
        || s.trim() != s
}

fn encode_yaml_scalar(value: &ConfigValue) -> Result<String> {
    match value {
        ConfigValue::Null => Ok("null".to_string()),
        ConfigValue::Bool(b) => Ok(b.to_string()),
        ConfigValue::Number(n) => Ok(encode_number(*n)),
        ConfigValue::String(s) => Ok(if needs_quoting(s) {
            quote_double(s)
        } else {
            s.clone()
        }),
        ConfigValue::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    ConfigValue::Map(_) => {
                        Err(Error::unsupported("YAML", "maps inside arrays are not supported"))
                    }
                    other => encode_yaml_scalar(other),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", parts.join(", ")))
        }
        ConfigValue::Map(_) => Err(Error::unsupported("YAML", "not a scalar")),
    }
}

/// Walk/create nested maps down `path`, returning the deepest map.
fn ensure_map_path<'a>(root: &'a mut ConfigMap, path: &[String]) -> &'a mut ConfigMap {
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

fn write_map(out: &mut String, map: &ConfigMap, depth: usize) -> Result<()> {
    let indent = "  ".repeat(depth);
    for (key, value) in map {
        out.push_str(&indent);
        out.push_str(key);
        out.push(':');
        match value {
            ConfigValue::Map(child) => {
                out.push('\n');
                write_map(out, child, depth + 1)?;
            }
            other => {
                out.push(' ');
                out.push_str(&encode_yaml_scalar(other)?);
                out.push('\n');
            }
        }
    }
    Ok(())
}

impl FormatHandler for YamlHandler {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn parse(&self, source: &str) -> Result<ParsedConfig> {
        let mut root = ConfigMap::new();
        let mut comments = CommentMap::new();
        let mut acc = CommentAccumulator::new();
        // Frames of (indent, path of the map receiving keys at that indent)
        let mut stack: Vec<(usize, Vec<String>)> = Vec::new();

        for (lineno, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                acc.blank_line();
                continue;
            }
            let content = line.trim_start();
            if let Some(rest) = content.strip_prefix('#') {
                acc.comment_line(rest);
                continue;
            }
            let indent = line.len() - content.len();
            while stack.last().is_some_and(|(top, _)| indent <= *top) {
                stack.pop();
            }
            if content == "-" || content.starts_with("- ") {
                return Err(Error::parse(
                    "YAML",
                    format!("block sequences are not supported (line {})", lineno + 1),
                ));
            }
            let Some((key_part, value_part)) = split_once_unquoted(content, ':') else {
                // Block-scalar body: skipped, not captured.
                continue;
            };
            let key_raw = key_part.trim();
            let key = unquote(key_raw).unwrap_or_else(|| key_raw.to_string());
            if key.is_empty() {
                return Err(Error::parse("YAML", format!("empty key on line {}", lineno + 1)));
            }

            let value_raw = value_part.trim();
            // Inline trailing comment, only for unquoted value portions
            let (value_str, trailing) = if value_raw.starts_with('"') || value_raw.starts_with('\'')
            {
                (value_raw, None)
            } else {
                match value_raw.find('#') {
                    Some(pos) => (
                        value_raw[..pos].trim_end(),
                        Some(value_raw[pos + 1..].trim().to_string()),
                    ),
                    None => (value_raw, None),
                }
            };

            let parent_path: Vec<String> = stack.last().map(|(_, p)| p.clone()).unwrap_or_default();
            let dotted = if parent_path.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", parent_path.join("."), key)
            };

            let mut comment = acc.take();
            if let Some(trailing) = trailing.filter(|t| !t.is_empty()) {
                comment = Some(match comment {
                    Some(pending) => format!("{pending} {trailing}"),
                    None => trailing,
                });
            }
            if let Some(comment) = comment {
                comments.attach(dotted, comment);
            }

            if value_str.is_empty() || value_str == "|" || value_str == ">" {
                let mut child_path = parent_path;
                child_path.push(key.clone());
                ensure_map_path(&mut root, &child_path);
                stack.push((indent, child_path));
            } else {
                ensure_map_path(&mut root, &parent_path)
                    .insert(key, decode_yaml_scalar(value_str));
            }
        }

        Ok(ParsedConfig {
            root: ConfigValue::Map(root),
            comments,
        })
    }

    fn serialize(&self, root: &ConfigValue) -> Result<String> {
        let map = root
            .as_map()
            .ok_or_else(|| Error::unsupported("YAML", "document root must be a map"))?;
        let mut out = String::new();
        write_map(&mut out, map, 0)?;
        Ok(out)
    }
}
