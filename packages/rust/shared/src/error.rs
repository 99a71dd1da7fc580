//! Error types for MetaTitle.
//!
//! Library crates use [`MetaTitleError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Title resolution itself never fails: lookup errors are logged and folded
//! into an empty candidate. Only the config and snapshot boundaries return
//! these errors to callers.

use std::path::PathBuf;

/// Top-level error type for all MetaTitle operations.
#[derive(Debug, thiserror::Error)]
pub enum MetaTitleError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A content-store lookup produced an error-like value.
    #[error("lookup error: {message}")]
    Lookup { message: String },

    /// Site snapshot could not be parsed.
    #[error("snapshot error: {message}")]
    Snapshot { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MetaTitleError>;

impl MetaTitleError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a lookup error from any displayable message.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup {
            message: msg.into(),
        }
    }

    /// Create a snapshot error from any displayable message.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = MetaTitleError::config("missing home directory");
        assert_eq!(err.to_string(), "config error: missing home directory");

        let err = MetaTitleError::lookup("term 7 in genre is corrupt");
        assert!(err.to_string().contains("term 7"));

        let err = MetaTitleError::io("/tmp/x", std::io::Error::other("denied"));
        assert!(err.to_string().contains("denied"));
    }
}
