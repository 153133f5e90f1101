//! Error types for modcfg-content

/// Result type for modcfg-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or serializing config documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("Cannot serialize to {format}: {reason}")]
    Unserializable { format: String, reason: String },

    #[error("No structural handler for format: {0}")]
    UnsupportedFormat(String),

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn unsupported(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unserializable {
            format: format.into(),
            reason: reason.into(),
        }
    }
}
