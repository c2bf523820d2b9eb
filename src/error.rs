// src/error.rs

use thiserror::Error;

/// A resource could not be read from its source.
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a whole `load` call. Carries the path that was in flight and
/// the underlying cause.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to retrieve {path}")]
    Retrieval {
        path: String,
        #[source]
        source: RetrievalError,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// Path of the resource that failed.
    pub fn path(&self) -> &str {
        match self {
            LoadError::Retrieval { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
