//! Error types for document operations.

use std::io;
use std::path::PathBuf;

/// Errors produced while resolving, mutating, loading or saving a document.
#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    /// A path segment could not be resolved to an object key.
    #[error("Property not found: '{0}'")]
    PathNotFound(String),

    /// The operation needs a parent object, and the root has none.
    #[error("Cannot modify the top level of the document")]
    TopLevel,

    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DocumentError {
    /// True for failures that happen while loading a document from disk.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;
