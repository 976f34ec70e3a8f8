//! Error types for mozdoc-build.

use std::path::PathBuf;

use thiserror::Error;

use mozdoc_core::{ConfigError, RepoError};
use mozdoc_sync::SyncError;

use crate::generator::GeneratorError;

/// All errors that can arise from branch builds and orchestration.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Resource sync / staging failure.
    #[error("sync error: {0}")]
    Sync(#[from] SyncError),

    /// Config load/merge failure.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot or clone failure; fatal for the invocation.
    #[error("repository error: {0}")]
    Repo(#[from] RepoError),

    /// The external generator failed or is not installed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A spawned build task could not be joined.
    #[error("build task join failure: {0}")]
    Join(String),
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
