//! Pure edit operations over a config value tree
//!
//! Every mutation is `(tree, path, op) -> new tree`: the root is consumed
//! and returned, so unaffected subtrees move through untouched and a
//! failed edit hands the original tree back unchanged.

use modcfg_content::path::{get_at_path_mut, parse_path, remove_at_path, PathSegment};
use modcfg_content::{ConfigValue, ValueKind};

/// Result type for edit operations
pub type Result<T> = std::result::Result<T, EditError>;

/// Errors from applying an edit
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Cannot {op} a {kind} node at {path}")]
    TypeMismatch {
        op: &'static str,
        kind: ValueKind,
        path: String,
    },

    #[error("Cannot edit the document root with {op}")]
    RootEdit { op: &'static str },
}

/// An edit to the node at a path.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Replace the node with a new value (scalar commit from a field).
    Set(ConfigValue),
    /// Flip a boolean node.
    Toggle,
    /// Remove the node from its parent (map key or array splice).
    Remove,
    /// Append a new element to an array node, cloned-by-type from the
    /// first existing element: bool arrays get `false`, number arrays get
    /// `0`, everything else (and empty arrays) gets `""`.
    ArrayPush,
    /// Insert a key into a map node (also used to re-add a deleted key).
    Insert { key: String, value: ConfigValue },
}

/// Default new element for an array, cloned-by-type from the first one.
fn push_default(items: &[ConfigValue]) -> ConfigValue {
    match items.first() {
        Some(ConfigValue::Bool(_)) => ConfigValue::Bool(false),
        Some(ConfigValue::Number(_)) => ConfigValue::Number(0.0),
        _ => ConfigValue::String(String::new()),
    }
}

/// Apply an edit, returning the new root.
///
/// # Examples
///
/// ```
/// use modcfg_content::{ConfigValue, Document, Format};
/// use modcfg_edit::{apply, EditOp};
///
/// let doc = Document::parse_as("[server]\nmax-players = 20\n", Format::Toml).unwrap();
/// let root = apply(
///     doc.root().clone(),
///     "server.max-players",
///     EditOp::Set(ConfigValue::Number(32.0)),
/// )
/// .unwrap();
/// assert_eq!(
///     root.get("server").and_then(|s| s.get("max-players")),
///     Some(&ConfigValue::Number(32.0))
/// );
/// ```
pub fn apply(mut root: ConfigValue, path: &str, op: EditOp) -> Result<ConfigValue> {
    let segments = parse_path(path);
    match op {
        EditOp::Set(value) => {
            let node = resolve_mut(&mut root, &segments, path)?;
            *node = value;
        }
        EditOp::Toggle => {
            let node = resolve_mut(&mut root, &segments, path)?;
            match node {
                ConfigValue::Bool(b) => *b = !*b,
                other => {
                    return Err(EditError::TypeMismatch {
                        op: "toggle",
                        kind: other.kind(),
                        path: path.to_string(),
                    });
                }
            }
        }
        EditOp::Remove => {
            if segments.is_empty() {
                return Err(EditError::RootEdit { op: "remove" });
            }
            if remove_at_path(&mut root, &segments).is_none() {
                return Err(EditError::PathNotFound {
                    path: path.to_string(),
                });
            }
        }
        EditOp::ArrayPush => {
            let node = resolve_mut(&mut root, &segments, path)?;
            match node {
                ConfigValue::Array(items) => {
                    let new_item = push_default(items);
                    items.push(new_item);
                }
                other => {
                    return Err(EditError::TypeMismatch {
                        op: "append to",
                        kind: other.kind(),
                        path: path.to_string(),
                    });
                }
            }
        }
        EditOp::Insert { key, value } => {
            let node = resolve_mut(&mut root, &segments, path)?;
            match node {
                ConfigValue::Map(map) => {
                    map.insert(key, value);
                }
                other => {
                    return Err(EditError::TypeMismatch {
                        op: "insert into",
                        kind: other.kind(),
                        path: path.to_string(),
                    });
                }
            }
        }
    }
    Ok(root)
}

fn resolve_mut<'a>(
    root: &'a mut ConfigValue,
    segments: &[PathSegment],
    path: &str,
) -> Result<&'a mut ConfigValue> {
    get_at_path_mut(root, segments).ok_or_else(|| EditError::PathNotFound {
        path: path.to_string(),
    })
}
