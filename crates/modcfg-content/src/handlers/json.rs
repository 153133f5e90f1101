//! JSON format handler
//!
//! Parsing is tolerant: whole-line `//` comments and trailing commas are
//! stripped before the standard parse. JSON has no comment grammar, so
//! stripped comments are discarded rather than captured — the comment map
//! for this format is always empty.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::comment::CommentMap;
use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler, ParsedConfig};
use crate::value::{ConfigMap, ConfigValue};

/// Trailing comma before a closing brace/bracket
static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Handler for JSON (and JSON5-flavored) files
#[derive(Debug, Default)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }
}

/// Drop `//`-prefixed whole lines and trailing commas.
fn strip_tolerant(source: &str) -> String {
    let without_comments = source
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");
    TRAILING_COMMA
        .replace_all(&without_comments, "$1")
        .into_owned()
}

fn from_json(value: Value) -> ConfigValue {
    match value {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::Number(n) => ConfigValue::Number(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => ConfigValue::String(s),
        Value::Array(items) => ConfigValue::Array(items.into_iter().map(from_json).collect()),
        Value::Object(map) => {
            let mut out = ConfigMap::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k, from_json(v));
            }
            ConfigValue::Map(out)
        }
    }
}

fn to_json(value: &ConfigValue) -> Value {
    match value {
        ConfigValue::Null => Value::Null,
        ConfigValue::Bool(b) => Value::Bool(*b),
        ConfigValue::Number(n) => {
            if ConfigValue::is_integral(*n) && n.abs() <= 9_007_199_254_740_992.0 {
                Value::Number((*n as i64).into())
            } else {
                serde_json::Number::from_f64(*n)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        ConfigValue::String(s) => Value::String(s.clone()),
        ConfigValue::Array(items) => Value::Array(items.iter().map(to_json).collect()),
        ConfigValue::Map(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k.clone(), to_json(v));
            }
            Value::Object(out)
        }
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, source: &str) -> Result<ParsedConfig> {
        let cleaned = strip_tolerant(source);
        let value: Value = match serde_json::from_str(&cleaned) {
            Ok(value) => value,
            // Cleanup mangled something (say, a "//" inside a multi-line
            // string): fall back to a strict parse of the original.
            Err(_) => serde_json::from_str(source)?,
        };
        Ok(ParsedConfig {
            root: from_json(value),
            comments: CommentMap::new(),
        })
    }

    fn serialize(&self, root: &ConfigValue) -> Result<String> {
        serde_json::to_string_pretty(&to_json(root)).map_err(Error::from)
    }
}
