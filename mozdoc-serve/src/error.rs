//! Error types for mozdoc-serve.

use std::path::PathBuf;

use thiserror::Error;

use mozdoc_build::{BuildError, GeneratorError};
use mozdoc_sync::SyncError;

/// Error surface for the serve runtime and watcher.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serve task join failure: {0}")]
    Join(String),
}

/// Convenience constructor for [`ServeError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ServeError {
    ServeError::Io {
        path: path.into(),
        source,
    }
}
