//! Staging-tree layout and skeleton materialization.
//!
//! # Layout
//!
//! ```text
//! <repo_root>/
//!   node_modules/mozdoc/wintersmith/   (generator skeleton, installed via npm)
//!   <root>/tmp/wintersmith/            (ephemeral staging tree, rebuilt per run)
//!   <repo_root>/tmp/branches/<name>/   (per-branch clones)
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Directory name of the generator's own dependency tree inside the skeleton.
/// Linked into staging rather than copied: large, reusable, and identical
/// across runs.
pub const GENERATOR_DEPS_DIR: &str = "node_modules";

/// `<root>/tmp/wintersmith` — the ephemeral staging tree for a branch's
/// working tree or clone root.
pub fn staging_dir(root: &Path) -> PathBuf {
    root.join("tmp").join("wintersmith")
}

/// `<repo_root>/tmp/branches` — per-branch clone roots.
pub fn branches_tmp_dir(repo_root: &Path) -> PathBuf {
    repo_root.join("tmp").join("branches")
}

/// `<repo_root>/node_modules/mozdoc/wintersmith` — the installed skeleton.
pub fn skeleton_dir(repo_root: &Path) -> PathBuf {
    repo_root
        .join("node_modules")
        .join("mozdoc")
        .join("wintersmith")
}

/// Remove `<repo_root>/tmp` if present. Absent is a no-op.
pub fn clean_temp(repo_root: &Path) -> Result<(), SyncError> {
    let tmp = repo_root.join("tmp");
    match std::fs::remove_dir_all(&tmp) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err(&tmp, e)),
    }
}

/// Materialize the generator skeleton into the staging directory.
///
/// Copies the skeleton tree file by file, except the generator's dependency
/// tree, which is symlinked. Repeatable: overwrites files from earlier runs
/// and leaves an existing link in place.
pub fn prepare(staging: &Path, skeleton: &Path) -> Result<(), SyncError> {
    if !skeleton.is_dir() {
        return Err(SyncError::SkeletonMissing {
            path: skeleton.to_path_buf(),
        });
    }
    std::fs::create_dir_all(staging).map_err(|e| io_err(staging, e))?;
    copy_tree(skeleton, staging)?;
    tracing::debug!(
        skeleton = %skeleton.display(),
        staging = %staging.display(),
        "staging tree prepared",
    );
    Ok(())
}

fn copy_tree(from: &Path, to: &Path) -> Result<(), SyncError> {
    let entries = std::fs::read_dir(from).map_err(|e| io_err(from, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(from, e))?;
        let source = entry.path();
        let dest = to.join(entry.file_name());
        let ty = entry.file_type().map_err(|e| io_err(&source, e))?;

        if entry.file_name() == GENERATOR_DEPS_DIR {
            link_deps(&source, &dest)?;
        } else if ty.is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| io_err(&dest, e))?;
            copy_tree(&source, &dest)?;
        } else if ty.is_file() {
            std::fs::copy(&source, &dest).map_err(|e| io_err(&source, e))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn link_deps(source: &Path, dest: &Path) -> Result<(), SyncError> {
    match std::fs::symlink_metadata(dest) {
        Ok(_) => return Ok(()), // left over from an earlier run
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(io_err(dest, e)),
    }
    std::os::unix::fs::symlink(source, dest).map_err(|e| io_err(dest, e))
}

#[cfg(not(unix))]
fn link_deps(source: &Path, dest: &Path) -> Result<(), SyncError> {
    // No cheap links; fall back to a full copy.
    std::fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;
    copy_tree(source, dest)
}
