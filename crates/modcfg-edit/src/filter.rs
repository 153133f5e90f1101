//! Key filter over a config tree
//!
//! Case-insensitive substring match over keys: a subtree is retained when
//! its own key matches or any descendant key matches. Produces a filtered
//! copy for display; the original tree is untouched.

use modcfg_content::{ConfigMap, ConfigValue};

/// Filter a tree by a key query. `None` when nothing matches.
///
/// An empty query retains everything.
pub fn filter_tree(value: &ConfigValue, query: &str) -> Option<ConfigValue> {
    if query.is_empty() {
        return Some(value.clone());
    }
    let needle = query.to_lowercase();
    filter_node(value, &needle)
}

fn filter_node(value: &ConfigValue, needle: &str) -> Option<ConfigValue> {
    match value {
        ConfigValue::Map(map) => {
            let mut kept = ConfigMap::new();
            for (key, child) in map {
                if key.to_lowercase().contains(needle) {
                    // Own key matches: the whole subtree stays.
                    kept.insert(key.clone(), child.clone());
                } else if let Some(filtered) = filter_node(child, needle) {
                    kept.insert(key.clone(), filtered);
                }
            }
            (!kept.is_empty()).then(|| ConfigValue::Map(kept))
        }
        ConfigValue::Array(items) => {
            // Indices are not keys; an element survives only if a key
            // somewhere inside it matches.
            let kept: Vec<ConfigValue> = items
                .iter()
                .filter_map(|item| filter_node(item, needle))
                .collect();
            (!kept.is_empty()).then(|| ConfigValue::Array(kept))
        }
        // A scalar has no keys of its own.
        _ => None,
    }
}
