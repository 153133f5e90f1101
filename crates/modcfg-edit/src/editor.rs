//! Per-node widget contract for the recursive editor
//!
//! The editor renders a config tree node-by-node, independent of the
//! format it came from. This module computes WHAT to render for a node;
//! front ends (terminal, GUI) decide how. Matching on [`NodeWidget`] is
//! exhaustive, so a new value kind cannot silently go unrendered.

use modcfg_content::ConfigValue;

/// Strings longer than this are edited in a multi-line area.
const MULTILINE_THRESHOLD: usize = 50;

/// Sliders are offered for numbers in this range.
const SLIDER_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1000.0;

/// Containers are expanded by default down to this depth.
const DEFAULT_EXPAND_DEPTH: usize = 2;

/// What the editor offers for one node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeWidget {
    /// Null: display-only; only "delete this key" is offered.
    Display,
    /// Bool: a toggle.
    Toggle { value: bool },
    /// Number: text field with the given step; `slider_max` bounds an
    /// optional slider rendering.
    NumberField {
        value: f64,
        step: f64,
        slider_max: Option<f64>,
    },
    /// String: single-line input.
    TextInput { value: String },
    /// String: promoted multi-line area (long or embedded newline).
    TextArea { value: String },
    /// Array: collapsible, with "add item" and per-index removal.
    ArrayNode { len: usize },
    /// Map: collapsible; children render recursively with per-key delete.
    MapNode { len: usize },
}

/// Compute the widget for a node.
pub fn widget_for(value: &ConfigValue) -> NodeWidget {
    match value {
        ConfigValue::Null => NodeWidget::Display,
        ConfigValue::Bool(b) => NodeWidget::Toggle { value: *b },
        ConfigValue::Number(n) => NodeWidget::NumberField {
            value: *n,
            step: if ConfigValue::is_integral(*n) { 1.0 } else { 0.1 },
            slider_max: SLIDER_RANGE
                .contains(n)
                .then(|| (2.0 * n).max(100.0)),
        },
        ConfigValue::String(s) => {
            if s.len() > MULTILINE_THRESHOLD || s.contains('\n') {
                NodeWidget::TextArea { value: s.clone() }
            } else {
                NodeWidget::TextInput { value: s.clone() }
            }
        }
        ConfigValue::Array(items) => NodeWidget::ArrayNode { len: items.len() },
        ConfigValue::Map(map) => NodeWidget::MapNode { len: map.len() },
    }
}

/// Whether a container at `depth` (root children are depth 0) starts
/// expanded: the first two nesting levels are open, deeper ones collapsed.
pub fn default_expanded(depth: usize) -> bool {
    depth < DEFAULT_EXPAND_DEPTH
}
