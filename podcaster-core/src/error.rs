use std::path::PathBuf;

use thiserror::Error;

/// Errors from the strict player entry points
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("episode index {index} is out of range for a queue of {len}")]
    InvalidIndex { index: usize, len: usize },
}

/// Errors raised while reading episode data
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("episode not found: {0}")]
    NotFound(String),
}
