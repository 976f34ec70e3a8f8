//! Repository introspection and branch cloning via git2.
//!
//! All libgit2 use lives here; the rest of the workspace only sees
//! [`RepoSnapshot`] values and plain paths.

use std::path::{Path, PathBuf};

use crate::error::RepoError;
use crate::types::{BranchName, RepoSnapshot};

impl RepoSnapshot {
    /// Capture the repository state for one invocation.
    ///
    /// Discovers the repository at or above `path`, reads the current branch
    /// from HEAD, enumerates local branch heads, and reads the `origin`
    /// remote URL (a missing remote is `None`, not an error).
    pub fn capture(path: &Path) -> Result<RepoSnapshot, RepoError> {
        let repo = discover(path)?;

        let head = repo.head().map_err(|e| {
            if e.code() == git2::ErrorCode::UnbornBranch {
                RepoError::NoCurrentBranch
            } else {
                RepoError::Git(e)
            }
        })?;
        if !head.is_branch() {
            return Err(RepoError::NoCurrentBranch);
        }
        let current_branch = head
            .shorthand()
            .map(BranchName::from)
            .ok_or(RepoError::NoCurrentBranch)?;

        let mut branches = Vec::new();
        for branch in repo.branches(Some(git2::BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                branches.push(BranchName::from(name));
            }
        }

        let origin_url = match repo.find_remote("origin") {
            Ok(remote) => remote.url().map(String::from),
            Err(e) if e.code() == git2::ErrorCode::NotFound => None,
            Err(e) => return Err(RepoError::Git(e)),
        };

        Ok(RepoSnapshot {
            current_branch,
            branches,
            origin_url,
        })
    }
}

/// Worktree root of the repository containing `path`.
pub fn repo_workdir(path: &Path) -> Result<PathBuf, RepoError> {
    let repo = discover(path)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or(RepoError::BareRepo)
}

/// Clone a single branch of the repository at `repo_root` into `dest`.
///
/// A local clone restricted to `branch`; used to materialize a buildable
/// source tree for every branch other than the checked-out one. Failure
/// propagates — a branch that cannot be cloned is fatal to the run.
pub fn clone_branch(repo_root: &Path, branch: &BranchName, dest: &Path) -> Result<(), RepoError> {
    let url = repo_root.to_string_lossy();
    git2::build::RepoBuilder::new()
        .branch(branch.as_str())
        .clone(&url, dest)?;
    Ok(())
}

fn discover(path: &Path) -> Result<git2::Repository, RepoError> {
    git2::Repository::discover(path).map_err(|_| RepoError::NotARepo {
        path: path.to_path_buf(),
    })
}
