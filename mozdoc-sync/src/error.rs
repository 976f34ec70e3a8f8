//! Error types for mozdoc-sync.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from resource sync and staging preparation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path handed to the engine does not live under a resource root.
    #[error("path is not under a resource root: {path}")]
    OutsideResourceRoots { path: PathBuf },

    /// The generator skeleton directory is missing.
    #[error("generator skeleton not found at {path}")]
    SkeletonMissing { path: PathBuf },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
