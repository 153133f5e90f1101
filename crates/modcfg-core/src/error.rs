//! Error types for modcfg-core

use std::path::PathBuf;

/// Result type for modcfg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in session orchestration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No structural tree for this file; it is in raw-text mode")]
    NotStructured,

    #[error(transparent)]
    Content(#[from] modcfg_content::Error),

    #[error(transparent)]
    Edit(#[from] modcfg_edit::EditError),
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
