//! Subcommand implementations.

pub mod build;
pub mod new;
pub mod publish;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};

use mozdoc_build::Wintersmith;
use mozdoc_core::{repo, RepoSnapshot};

use crate::Globals;

/// Resolved invocation context shared by `build`, `serve`, and `publish`.
pub(crate) struct Workspace {
    pub snapshot: RepoSnapshot,
    /// Worktree root of the repository containing the doc source.
    pub repo_root: PathBuf,
    /// Doc source directory, absolute.
    pub source_dir: PathBuf,
    /// Doc source location relative to the repository root; joined onto
    /// per-branch clone roots.
    pub docs_rel: PathBuf,
    /// Output root, absolute.
    pub output: PathBuf,
    pub generator: Wintersmith,
}

impl Workspace {
    pub fn resolve(globals: &Globals) -> Result<Workspace> {
        let source_dir = globals
            .chdir
            .canonicalize()
            .with_context(|| format!("cannot resolve source dir '{}'", globals.chdir.display()))?;

        let repo_root = repo::repo_workdir(&source_dir)?;
        let repo_root = repo_root
            .canonicalize()
            .with_context(|| format!("cannot resolve repo root '{}'", repo_root.display()))?;
        let docs_rel = source_dir
            .strip_prefix(&repo_root)
            .with_context(|| {
                format!(
                    "source dir '{}' is outside its repository '{}'",
                    source_dir.display(),
                    repo_root.display()
                )
            })?
            .to_path_buf();

        let output = if globals.output.is_absolute() {
            globals.output.clone()
        } else {
            std::env::current_dir()
                .context("cannot determine working directory")?
                .join(&globals.output)
        };

        let snapshot = RepoSnapshot::capture(&source_dir)?;
        // Missing generator package is fatal with an install diagnostic.
        let generator = Wintersmith::locate(&repo_root)?;

        Ok(Workspace {
            snapshot,
            repo_root,
            source_dir,
            docs_rel,
            output,
            generator,
        })
    }
}
