//! Config document parsing and serialization for modcfg
//!
//! Four formats (JSON, TOML, YAML, Properties) parse into one unified
//! value tree with comments captured against node paths, and serialize
//! back to format-correct text. Parse and serialize are pure functions of
//! their input; nothing here touches the filesystem.

pub mod comment;
pub mod document;
pub mod error;
pub mod format;
pub mod handlers;
pub mod path;
pub mod value;

pub use comment::{CommentAccumulator, CommentMap};
pub use document::Document;
pub use error::{Error, Result};
pub use format::{handler_for, Format, FormatHandler, ParsedConfig};
pub use path::{parse_path, PathSegment};
pub use value::{ConfigMap, ConfigValue, ValueKind};
