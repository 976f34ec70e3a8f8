//! Error types for mozdoc-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from repository introspection and cloning.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No git repository found at or above the given path.
    #[error("not a git repository: {path}")]
    NotARepo { path: PathBuf },

    /// The repository is bare — there is no documentation tree to build.
    #[error("bare repository has no working directory")]
    BareRepo,

    /// HEAD is detached or unborn; branch builds need a current branch.
    #[error("HEAD is not on a branch; check out a branch first")]
    NoCurrentBranch,

    /// Underlying libgit2 failure (clone, branch enumeration, remote lookup).
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

/// Malformed remote URL — refuse to derive URLs silently.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("malformed remote URL '{remote}': expected …/<user>/<repo>")]
    Malformed { remote: String },
}

/// All errors that can arise from config loading and merging.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `config.json` did not parse.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The origin remote URL could not be split into user/repo.
    #[error(transparent)]
    Url(#[from] UrlError),

    /// Serialization failure writing the merged config into staging.
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
