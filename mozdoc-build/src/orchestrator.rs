//! The branch build orchestrator.
//!
//! Fan-out/fan-in over a [`tokio::task::JoinSet`]: one build task per branch,
//! all issued before any resolves, joined to completion in arbitrary order.
//! Completion is keyed on "task finished", never on "build succeeded" — a
//! failing branch is captured in its [`BranchOutcome`] and never blocks the
//! fan-in. The redirect artifact is written exactly once, after the join.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use mozdoc_core::{repo, BranchName, RepoError, RepoSnapshot};
use mozdoc_sync::staging;

use crate::builder::{build_branch, BuildTask};
use crate::error::{io_err, BuildError};
use crate::generator::SiteGenerator;
use crate::redirect::write_redirect;

// ---------------------------------------------------------------------------
// Branch source seam
// ---------------------------------------------------------------------------

/// Materializes a buildable source tree for a branch other than the
/// checked-out one.
pub trait BranchSource: Send + Sync {
    fn prepare(&self, branch: &BranchName, dest: &Path) -> Result<(), RepoError>;
}

/// Real branch source: a local single-branch clone of the working repository.
pub struct GitBranchSource {
    repo_root: PathBuf,
}

impl GitBranchSource {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl BranchSource for GitBranchSource {
    fn prepare(&self, branch: &BranchName, dest: &Path) -> Result<(), RepoError> {
        tracing::info!(branch = %branch, dest = %dest.display(), "cloning branch");
        repo::clone_branch(&self.repo_root, branch, dest)
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Result of one branch's build, success or captured failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOutcome {
    pub branch: BranchName,
    pub error: Option<String>,
}

impl BranchOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything the fan-in produced: per-branch outcomes (in completion order)
/// and the redirect artifact path.
#[derive(Debug)]
pub struct BuildReport {
    pub outcomes: Vec<BranchOutcome>,
    pub redirect: PathBuf,
}

impl BuildReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(BranchOutcome::succeeded)
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Build every branch of the snapshot into `<output_root>/<branch>/`.
///
/// The current branch builds from the already-checked-out tree (no clone);
/// every other branch from a fresh clone under `tmp/branches/<branch>/`.
/// Clones are prepared before any build is spawned, so a clone failure
/// aborts the whole run with no partial fan-out. Build failures do not:
/// each one is captured in the report while its siblings run to completion.
pub async fn build_all_branches(
    snapshot: &RepoSnapshot,
    repo_root: &Path,
    docs_rel: &Path,
    output_root: &Path,
    skeleton: &Path,
    source: &dyn BranchSource,
    generator: Arc<dyn SiteGenerator>,
) -> Result<BuildReport, BuildError> {
    let mut tasks = Vec::with_capacity(snapshot.branches.len());
    for branch in &snapshot.branches {
        let branch_root = if *branch == snapshot.current_branch {
            repo_root.to_path_buf()
        } else {
            let clone_root = staging::branches_tmp_dir(repo_root).join(branch.as_str());
            source.prepare(branch, &clone_root)?;
            clone_root
        };
        tasks.push(BuildTask {
            branch: branch.clone(),
            source_dir: branch_root.join(docs_rel),
            staging_dir: staging::staging_dir(&branch_root),
            output_dir: output_root.join(branch.as_str()),
        });
    }

    // Fan-out: every build issued before any resolves.
    let mut set = JoinSet::new();
    for task in tasks {
        let snapshot = snapshot.clone();
        let skeleton = skeleton.to_path_buf();
        let generator = generator.clone();
        set.spawn(async move {
            let result = build_branch(&task, &snapshot, &skeleton, generator.as_ref()).await;
            (task.branch, result)
        });
    }

    // Fan-in: join all, in whatever order they finish.
    let mut outcomes = Vec::new();
    while let Some(joined) = set.join_next().await {
        let (branch, result) = joined.map_err(|e| BuildError::Join(e.to_string()))?;
        match &result {
            Ok(()) => tracing::info!(branch = %branch, "branch build finished"),
            Err(err) => tracing::error!(branch = %branch, error = %err, "branch build failed"),
        }
        outcomes.push(BranchOutcome {
            branch,
            error: result.err().map(|e| e.to_string()),
        });
    }

    let redirect = write_redirect(output_root, &snapshot.current_branch)?;
    Ok(BuildReport { outcomes, redirect })
}

/// [`build_all_branches`] on a fresh multi-thread runtime, blocking the
/// calling thread.
#[allow(clippy::too_many_arguments)]
pub fn build_all_blocking(
    snapshot: &RepoSnapshot,
    repo_root: &Path,
    docs_rel: &Path,
    output_root: &Path,
    skeleton: &Path,
    source: &dyn BranchSource,
    generator: Arc<dyn SiteGenerator>,
) -> Result<BuildReport, BuildError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(build_all_branches(
        snapshot,
        repo_root,
        docs_rel,
        output_root,
        skeleton,
        source,
        generator,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
