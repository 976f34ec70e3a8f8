//! Seam to the external site generator.
//!
//! The generator owns rendering and templating entirely; mozdoc only invokes
//! it. [`Wintersmith`] runs the real `wintersmith` executable as a
//! subprocess; [`mock::RecordingGenerator`] stands in for it in tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::{Child, Command};

use mozdoc_sync::staging;

/// Errors from generator location and invocation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The generator package is not installed next to the repository.
    #[error(
        "mozdoc generator package not found at {path}\n\
         install it locally first:\n\n\tnpm install mozdoc\n"
    )]
    NotInstalled { path: PathBuf },

    /// Failed to spawn or wait on the generator process.
    #[error("failed to run {program}: {source}")]
    Process {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generator exited with a failure status.
    #[error("generator build failed for {staging} (exit status {status})")]
    BuildFailed { staging: PathBuf, status: String },

    /// Injected failure from a test double.
    #[error("{0}")]
    Mock(String),
}

/// One site build against a prepared staging tree.
#[async_trait]
pub trait SiteGenerator: Send + Sync {
    /// Build the staging tree into `output`. Errors are returned, never
    /// thrown past the task boundary.
    async fn build(&self, staging: &Path, output: &Path) -> Result<(), GeneratorError>;
}

/// The real generator: the `wintersmith` executable installed with the
/// mozdoc npm package.
#[derive(Debug, Clone)]
pub struct Wintersmith {
    program: PathBuf,
    skeleton: PathBuf,
}

impl Wintersmith {
    /// Locate the generator relative to the repository root.
    ///
    /// Missing-prerequisite check: the skeleton must exist or the whole
    /// command is refused with an install diagnostic. The executable is
    /// preferred from `node_modules/.bin/`, falling back to `$PATH`.
    pub fn locate(repo_root: &Path) -> Result<Wintersmith, GeneratorError> {
        let skeleton = staging::skeleton_dir(repo_root);
        if !skeleton.is_dir() {
            return Err(GeneratorError::NotInstalled { path: skeleton });
        }
        let local = repo_root
            .join("node_modules")
            .join(".bin")
            .join("wintersmith");
        let program = if local.exists() {
            local
        } else {
            PathBuf::from("wintersmith")
        };
        Ok(Wintersmith { program, skeleton })
    }

    /// The generator skeleton copied into every staging tree.
    pub fn skeleton(&self) -> &Path {
        &self.skeleton
    }

    /// Spawn `wintersmith preview` for a serve session.
    ///
    /// Runs detached from the caller's control flow so the watcher loop is
    /// never blocked; the caller owns (and kills) the child.
    pub fn preview(&self, staging: &Path, output: &Path) -> Result<Child, GeneratorError> {
        Command::new(&self.program)
            .arg("preview")
            .arg("--chdir")
            .arg(staging)
            .arg("--output")
            .arg(output)
            .spawn()
            .map_err(|source| GeneratorError::Process {
                program: self.program.clone(),
                source,
            })
    }
}

#[async_trait]
impl SiteGenerator for Wintersmith {
    async fn build(&self, staging: &Path, output: &Path) -> Result<(), GeneratorError> {
        tracing::info!(staging = %staging.display(), output = %output.display(), "wintersmith build");
        let status = Command::new(&self.program)
            .arg("build")
            .arg("--chdir")
            .arg(staging)
            .arg("-X")
            .arg("--output")
            .arg(output)
            .status()
            .await
            .map_err(|source| GeneratorError::Process {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(GeneratorError::BuildFailed {
                staging: staging.to_path_buf(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

pub mod mock {
    //! Recording generator for orchestrator tests.

    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{GeneratorError, SiteGenerator};

    /// Records every build invocation; failure and delay injection keyed on
    /// output-path substrings so tests can target individual branches.
    #[derive(Debug, Default)]
    pub struct RecordingGenerator {
        calls: Mutex<Vec<(PathBuf, PathBuf)>>,
        failures: Mutex<Vec<String>>,
        delays: Mutex<Vec<(String, Duration)>>,
    }

    impl RecordingGenerator {
        pub fn new() -> Self {
            Self::default()
        }

        /// Fail any build whose output path contains `needle`.
        pub fn fail_for(&self, needle: &str) {
            self.failures.lock().unwrap().push(needle.to_owned());
        }

        /// Delay any build whose output path contains `needle`.
        pub fn delay_for(&self, needle: &str, delay: Duration) {
            self.delays
                .lock()
                .unwrap()
                .push((needle.to_owned(), delay));
        }

        /// Every `(staging, output)` pair built so far, in completion order.
        pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SiteGenerator for RecordingGenerator {
        async fn build(&self, staging: &Path, output: &Path) -> Result<(), GeneratorError> {
            let output_str = output.to_string_lossy().into_owned();
            let delay = self
                .delays
                .lock()
                .unwrap()
                .iter()
                .find(|(needle, _)| output_str.contains(needle))
                .map(|(_, d)| *d);
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            self.calls
                .lock()
                .unwrap()
                .push((staging.to_path_buf(), output.to_path_buf()));

            let failed = self
                .failures
                .lock()
                .unwrap()
                .iter()
                .any(|needle| output_str.contains(needle));
            if failed {
                return Err(GeneratorError::Mock(format!(
                    "injected failure for {output_str}"
                )));
            }
            Ok(())
        }
    }
}
