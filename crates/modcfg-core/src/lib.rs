//! Round-trip orchestration for modcfg
//!
//! Composes the format detector, parsers, editor, and serializers with
//! the external file collaborators: one [`EditorSession`] per open config
//! file, with dirty tracking and raw-text degradation.

pub mod cache;
pub mod error;
pub mod files;
pub mod session;

pub use cache::ParseCache;
pub use error::{Error, Result};
pub use files::{CandidateFile, CandidateIndex, ConfigStore, DirCandidateIndex, FsConfigStore};
pub use session::EditorSession;
