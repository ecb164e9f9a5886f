//! Error types for content loading.

use std::path::PathBuf;

use folio_core::CoreError;
use thiserror::Error;

use crate::graph::GraphError;

/// Result type for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Content loading errors.
///
/// Missing directories and files are not errors; loaders report them as
/// empty listings or `None`.
#[derive(Debug, Error)]
pub enum ContentError {
    /// IO error while reading an existing directory or file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A graph document without usable graph data.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl ContentError {
    /// Create an IO error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error describes corrupt content rather than a failing disk.
    ///
    /// Listings skip records failing this way and keep going.
    pub fn is_malformed_content(&self) -> bool {
        matches!(self, Self::Graph(_))
    }
}
