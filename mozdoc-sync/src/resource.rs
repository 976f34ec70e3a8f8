//! The resource sync engine.
//!
//! Maps a change under one of the fixed resource roots into an operation
//! against the staging content tree. One rule is special-cased: `documents/`
//! contents land at the root of the content tree, while every other root
//! keeps its own subdirectory (`documents/foo/bar.md` → `contents/foo/bar.md`,
//! `images/x.png` → `contents/images/x.png`).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mozdoc_core::types::ResourceRoot;

use crate::error::{io_err, SyncError};

/// Directory inside the staging tree the generator reads content from.
pub const CONTENTS_DIR: &str = "contents";

/// One synchronization operation against the staging tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    /// Overwrite the destination file with the source file's current bytes.
    UpsertFile,
    /// Ensure the destination directory exists.
    UpsertDir,
    /// Remove the destination (file or directory), absent is a no-op.
    Delete,
}

/// Destination of a source-relative resource path within the staging tree.
pub fn dest_path(staging: &Path, rel: &Path) -> PathBuf {
    let contents = staging.join(CONTENTS_DIR);
    match rel.strip_prefix(ResourceRoot::Documents.as_str()) {
        Ok(flattened) => contents.join(flattened),
        Err(_) => contents.join(rel),
    }
}

/// Apply one operation for a source-relative path under a resource root.
///
/// Local filesystem idempotence: creating an existing directory and deleting
/// an absent destination are no-ops. Everything else surfaces as an error.
pub fn apply(
    source_dir: &Path,
    staging: &Path,
    rel: &Path,
    op: SyncOp,
) -> Result<(), SyncError> {
    if ResourceRoot::containing(rel).is_none() {
        return Err(SyncError::OutsideResourceRoots {
            path: rel.to_path_buf(),
        });
    }

    let dest = dest_path(staging, rel);
    match op {
        SyncOp::UpsertDir => {
            std::fs::create_dir_all(&dest).map_err(|e| io_err(&dest, e))?;
        }
        SyncOp::UpsertFile => {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            let source = source_dir.join(rel);
            std::fs::copy(&source, &dest).map_err(|e| io_err(&source, e))?;
        }
        SyncOp::Delete => remove_any(&dest)?,
    }
    tracing::debug!(rel = %rel.display(), ?op, "synced resource");
    Ok(())
}

/// Bulk mode: sync every entry under every resource root into staging.
///
/// Roots that do not exist in the source tree are skipped; dot-prefixed
/// entries are ignored, matching the watch-mode filter.
pub fn sync_all(source_dir: &Path, staging: &Path) -> Result<(), SyncError> {
    for root in ResourceRoot::ALL {
        let root_dir = source_dir.join(root.as_str());
        if !root_dir.exists() {
            continue;
        }
        sync_tree(source_dir, staging, Path::new(root.as_str()))?;
    }
    Ok(())
}

fn sync_tree(source_dir: &Path, staging: &Path, rel: &Path) -> Result<(), SyncError> {
    let mut pending = vec![rel.to_path_buf()];
    while let Some(rel) = pending.pop() {
        let absolute = source_dir.join(&rel);
        let entries = std::fs::read_dir(&absolute).map_err(|e| io_err(&absolute, e))?;
        apply(source_dir, staging, &rel, SyncOp::UpsertDir)?;

        for entry in entries {
            let entry = entry.map_err(|e| io_err(&absolute, e))?;
            if is_hidden(&entry.file_name()) {
                continue;
            }
            let child_rel = rel.join(entry.file_name());
            let ty = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
            if ty.is_dir() {
                pending.push(child_rel);
            } else if ty.is_file() {
                apply(source_dir, staging, &child_rel, SyncOp::UpsertFile)?;
            }
        }
    }
    Ok(())
}

/// Whether a file name is dot-prefixed (editor droppings, VCS metadata).
pub fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn remove_any(dest: &Path) -> Result<(), SyncError> {
    let meta = match std::fs::symlink_metadata(dest) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(io_err(dest, e)),
    };
    let result = if meta.is_dir() {
        std::fs::remove_dir_all(dest)
    } else {
        std::fs::remove_file(dest)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_err(dest, e)),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn documents_flatten_to_content_root() {
        let staging = PathBuf::from("/staging");
        assert_eq!(
            dest_path(&staging, Path::new("documents/a/b.md")),
            PathBuf::from("/staging/contents/a/b.md")
        );
    }

    #[test]
    fn other_roots_keep_their_subdirectory() {
        let staging = PathBuf::from("/staging");
        assert_eq!(
            dest_path(&staging, Path::new("images/x.png")),
            PathBuf::from("/staging/contents/images/x.png")
        );
        assert_eq!(
            dest_path(&staging, Path::new("css/site.css")),
            PathBuf::from("/staging/contents/css/site.css")
        );
    }

    #[test]
    fn upsert_file_overwrites_destination() {
        let source = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let rel = Path::new("documents/guide.md");
        write(&source.path().join(rel), "v1");

        apply(source.path(), staging.path(), rel, SyncOp::UpsertFile).unwrap();
        let dest = staging.path().join("contents/guide.md");
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "v1");

        write(&source.path().join(rel), "v2");
        apply(source.path(), staging.path(), rel, SyncOp::UpsertFile).unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "v2");
    }

    #[test]
    fn upsert_dir_is_idempotent() {
        let source = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let rel = Path::new("images/icons");
        apply(source.path(), staging.path(), rel, SyncOp::UpsertDir).unwrap();
        apply(source.path(), staging.path(), rel, SyncOp::UpsertDir).unwrap();
        assert!(staging.path().join("contents/images/icons").is_dir());
    }

    #[test]
    fn delete_removes_exactly_the_mapped_destination() {
        let source = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        write(&source.path().join("documents/a.md"), "a");
        write(&source.path().join("documents/b.md"), "b");
        sync_all(source.path(), staging.path()).unwrap();

        apply(
            source.path(),
            staging.path(),
            Path::new("documents/a.md"),
            SyncOp::Delete,
        )
        .unwrap();

        assert!(!staging.path().join("contents/a.md").exists());
        assert!(staging.path().join("contents/b.md").exists());
    }

    #[test]
    fn delete_of_absent_destination_is_a_no_op() {
        let source = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        apply(
            source.path(),
            staging.path(),
            Path::new("documents/never-existed.md"),
            SyncOp::Delete,
        )
        .unwrap();
    }

    #[test]
    fn delete_removes_directories_recursively() {
        let source = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        write(&source.path().join("prototypes/demo/index.html"), "<html>");
        sync_all(source.path(), staging.path()).unwrap();

        apply(
            source.path(),
            staging.path(),
            Path::new("prototypes/demo"),
            SyncOp::Delete,
        )
        .unwrap();
        assert!(!staging.path().join("contents/prototypes/demo").exists());
    }

    #[test]
    fn paths_outside_resource_roots_are_rejected() {
        let source = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let err = apply(
            source.path(),
            staging.path(),
            Path::new("secrets/key.pem"),
            SyncOp::UpsertFile,
        );
        assert!(matches!(err, Err(SyncError::OutsideResourceRoots { .. })));
    }

    #[test]
    fn sync_all_copies_every_root_and_skips_dotfiles() {
        let source = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        write(&source.path().join("documents/index.md"), "# hi");
        write(&source.path().join("documents/nested/deep.md"), "deep");
        write(&source.path().join("images/logo.png"), "png");
        write(&source.path().join("documents/.swap.md~"), "junk");

        sync_all(source.path(), staging.path()).unwrap();

        assert!(staging.path().join("contents/index.md").exists());
        assert!(staging.path().join("contents/nested/deep.md").exists());
        assert!(staging.path().join("contents/images/logo.png").exists());
        assert!(!staging.path().join("contents/.swap.md~").exists());
    }
}
