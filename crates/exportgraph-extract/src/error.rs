//! Error types for source-fact extraction.

use std::path::PathBuf;

use exportgraph::ModuleIdError;
use thiserror::Error;

/// Errors raised while discovering or parsing source files.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The parser reported syntax errors.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A discovered path could not be turned into a module id.
    #[error(transparent)]
    ModuleId(#[from] ModuleIdError),
}

impl ExtractError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
