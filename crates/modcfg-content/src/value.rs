//! The unified config value tree
//!
//! Every format handler parses into (and serializes from) this one
//! representation, so the editor and orchestrator never need to know
//! which format a document came from.

use indexmap::IndexMap;

/// Insertion-ordered map used for every object level of the tree.
///
/// Key order is semantically irrelevant for equality but is preserved so
/// that serialization keeps the key order of the file that was loaded.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A node of a parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ConfigValue>),
    Map(ConfigMap),
}

/// The kind of a [`ConfigValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Map,
}

impl ConfigValue {
    /// Kind tag for this node.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<ConfigValue>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Child lookup by map key. `None` for non-maps and missing keys.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Child lookup by array index. `None` for non-arrays and out of range.
    pub fn get_index(&self, index: usize) -> Option<&ConfigValue> {
        self.as_array().and_then(|a| a.get(index))
    }

    /// Number of children (map entries or array elements); 0 for scalars.
    pub fn len(&self) -> usize {
        match self {
            Self::Array(items) => items.len(),
            Self::Map(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this node is a container (array or map).
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Map(_))
    }

    /// An empty map node.
    pub fn empty_map() -> Self {
        Self::Map(ConfigMap::new())
    }

    /// Whether a number payload has no fractional part.
    ///
    /// The editor treats such numbers as integers (step 1 instead of 0.1),
    /// and the serializers emit them without a decimal point.
    pub fn is_integral(n: f64) -> bool {
        n.is_finite() && n.fract() == 0.0
    }
}

impl Default for ConfigValue {
    /// An empty map, the natural root for a structural document.
    fn default() -> Self {
        Self::empty_map()
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Map => "map",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(ConfigValue::Null.kind(), ValueKind::Null);
        assert_eq!(ConfigValue::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(ConfigValue::Number(1.5).kind(), ValueKind::Number);
        assert_eq!(ConfigValue::from("x").kind(), ValueKind::String);
        assert_eq!(ConfigValue::Array(vec![]).kind(), ValueKind::Array);
        assert_eq!(ConfigValue::empty_map().kind(), ValueKind::Map);
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let mut map = ConfigMap::new();
        map.insert("zebra".to_string(), ConfigValue::Number(1.0));
        map.insert("alpha".to_string(), ConfigValue::Number(2.0));
        map.insert("mid".to_string(), ConfigValue::Number(3.0));
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zebra", "alpha", "mid"]);
    }

    #[test]
    fn test_equality_ignores_map_order() {
        // IndexMap equality is order-insensitive, which is exactly the
        // contract: order matters for serialization, not for value equality.
        let mut a = ConfigMap::new();
        a.insert("x".to_string(), ConfigValue::Bool(true));
        a.insert("y".to_string(), ConfigValue::Bool(false));
        let mut b = ConfigMap::new();
        b.insert("y".to_string(), ConfigValue::Bool(false));
        b.insert("x".to_string(), ConfigValue::Bool(true));
        assert_eq!(ConfigValue::Map(a), ConfigValue::Map(b));
    }

    #[test]
    fn test_is_integral() {
        assert!(ConfigValue::is_integral(20.0));
        assert!(ConfigValue::is_integral(0.0));
        assert!(ConfigValue::is_integral(-3.0));
        assert!(!ConfigValue::is_integral(0.1));
        assert!(!ConfigValue::is_integral(f64::NAN));
    }

    #[test]
    fn test_child_accessors() {
        let mut map = ConfigMap::new();
        map.insert("items".to_string(), ConfigValue::Array(vec![1i64.into()]));
        let value = ConfigValue::Map(map);
        assert_eq!(value.len(), 1);
        assert_eq!(
            value.get("items").and_then(|v| v.get_index(0)),
            Some(&ConfigValue::Number(1.0))
        );
        assert_eq!(value.get("missing"), None);
    }
}
