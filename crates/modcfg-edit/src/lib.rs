//! Format-agnostic recursive editing of config value trees
//!
//! Operates on any `ConfigValue` tree, independent of which format
//! produced it: pure edit application, a per-node widget contract for
//! front ends, and a key filter.

pub mod edit;
pub mod editor;
pub mod filter;

pub use edit::{apply, EditError, EditOp};
pub use editor::{default_expanded, widget_for, NodeWidget};
pub use filter::filter_tree;
