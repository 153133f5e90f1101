//! Path parsing and traversal over the config value tree
//!
//! A path addresses exactly one node: dot-separated map keys, with array
//! elements addressed as `key[index]`.
//!
//! # Path Syntax
//!
//! - Dot-separated keys: `server.database.host`
//! - Array indexing: `rules[0]`
//! - Combined: `server.rules[2].name`

use crate::value::ConfigValue;

/// A segment of a path - either a map key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in a map (e.g., "database" in "server.database")
    Key(String),
    /// An index in an array (e.g., 2 in `rules[2]`)
    Index(usize),
}

/// Parse a path string into segments.
///
/// # Examples
///
/// ```
/// use modcfg_content::path::{parse_path, PathSegment};
///
/// let path = parse_path("server.rules[2]");
/// assert_eq!(path, vec![
///     PathSegment::Key("server".to_string()),
///     PathSegment::Key("rules".to_string()),
///     PathSegment::Index(2),
/// ]);
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(current_key.clone()));
                    current_key.clear();
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(current_key.clone()));
                    current_key.clear();
                }
                let mut index_str = String::new();
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                    index_str.push(ch);
                }
                if let Ok(index) = index_str.parse::<usize>() {
                    segments.push(PathSegment::Index(index));
                }
            }
            _ => {
                current_key.push(ch);
            }
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    segments
}

/// Append a map key to a path string (`"a"` + `"b"` → `"a.b"`).
pub fn join_key(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

/// Append an array index to a path string (`"a.rules"` + `2` → `"a.rules[2]"`).
pub fn join_index(base: &str, index: usize) -> String {
    format!("{base}[{index}]")
}

/// Get a reference to the node at the given path.
///
/// Returns `None` if the path doesn't resolve.
///
/// # Examples
///
/// ```
/// use modcfg_content::path::{parse_path, get_at_path};
/// use modcfg_content::{ConfigMap, ConfigValue};
///
/// let mut inner = ConfigMap::new();
/// inner.insert("host".to_string(), ConfigValue::from("localhost"));
/// let mut root = ConfigMap::new();
/// root.insert("server".to_string(), ConfigValue::Map(inner));
/// let root = ConfigValue::Map(root);
///
/// let path = parse_path("server.host");
/// assert_eq!(get_at_path(&root, &path), Some(&ConfigValue::from("localhost")));
/// assert_eq!(get_at_path(&root, &parse_path("server.missing")), None);
/// ```
pub fn get_at_path<'a>(value: &'a ConfigValue, segments: &[PathSegment]) -> Option<&'a ConfigValue> {
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Some(value),
    };

    let next_value = match first {
        PathSegment::Key(key) => value.get(key)?,
        PathSegment::Index(idx) => value.get_index(*idx)?,
    };

    get_at_path(next_value, rest)
}

/// Mutable variant of [`get_at_path`].
pub fn get_at_path_mut<'a>(
    value: &'a mut ConfigValue,
    segments: &[PathSegment],
) -> Option<&'a mut ConfigValue> {
    let (first, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Some(value),
    };

    let next_value = match first {
        PathSegment::Key(key) => value.as_map_mut()?.get_mut(key)?,
        PathSegment::Index(idx) => value.as_array_mut()?.get_mut(*idx)?,
    };

    get_at_path_mut(next_value, rest)
}

/// Set the node at the given path.
///
/// The final segment is inserted if it is a missing map key; a missing
/// array index fails. Returns `true` on success.
///
/// # Examples
///
/// ```
/// use modcfg_content::path::{parse_path, set_at_path, get_at_path};
/// use modcfg_content::{ConfigMap, ConfigValue};
///
/// let mut map = ConfigMap::new();
/// map.insert("name".to_string(), ConfigValue::from("old"));
/// let mut root = ConfigValue::Map(map);
/// assert!(set_at_path(&mut root, &parse_path("name"), ConfigValue::from("new")));
/// assert_eq!(root.get("name"), Some(&ConfigValue::from("new")));
/// ```
pub fn set_at_path(
    value: &mut ConfigValue,
    segments: &[PathSegment],
    new_value: ConfigValue,
) -> bool {
    let Some((last, parents)) = segments.split_last() else {
        *value = new_value;
        return true;
    };

    let Some(parent) = get_at_path_mut(value, parents) else {
        return false;
    };

    match last {
        PathSegment::Key(key) => match parent.as_map_mut() {
            Some(map) => {
                map.insert(key.clone(), new_value);
                true
            }
            None => false,
        },
        PathSegment::Index(idx) => match parent.as_array_mut() {
            Some(arr) if *idx < arr.len() => {
                arr[*idx] = new_value;
                true
            }
            _ => false,
        },
    }
}

/// Remove the node at the given path, returning it.
///
/// Array removal splices by index; map removal preserves the order of the
/// remaining keys.
///
/// # Examples
///
/// ```
/// use modcfg_content::path::{parse_path, remove_at_path};
/// use modcfg_content::{ConfigMap, ConfigValue};
///
/// let mut map = ConfigMap::new();
/// map.insert("name".to_string(), ConfigValue::from("test"));
/// map.insert("version".to_string(), ConfigValue::from("1.0"));
/// let mut root = ConfigValue::Map(map);
/// let removed = remove_at_path(&mut root, &parse_path("version"));
/// assert_eq!(removed, Some(ConfigValue::from("1.0")));
/// assert_eq!(root.get("version"), None);
/// ```
pub fn remove_at_path(value: &mut ConfigValue, segments: &[PathSegment]) -> Option<ConfigValue> {
    let (last, parents) = segments.split_last()?;
    let parent = get_at_path_mut(value, parents)?;

    match last {
        PathSegment::Key(key) => parent.as_map_mut()?.shift_remove(key),
        PathSegment::Index(idx) => {
            let arr = parent.as_array_mut()?;
            if *idx < arr.len() {
                Some(arr.remove(*idx))
            } else {
                None
            }
        }
    }
}
