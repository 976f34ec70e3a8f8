//! Classification of watch events into sync operations.
//!
//! Pure functions so the mapping is testable without a running watcher:
//! one filesystem event maps to at most one [`SyncOp`].

use std::path::{Path, PathBuf};

use notify::event::{CreateKind, EventKind, ModifyKind};

use mozdoc_core::types::ResourceRoot;
use mozdoc_sync::{resource, SyncOp};

/// The operation a watch event calls for, given whether the path is
/// currently a directory.
pub fn classify(kind: &EventKind, is_dir: bool) -> Option<SyncOp> {
    match kind {
        EventKind::Create(CreateKind::Folder) => Some(SyncOp::UpsertDir),
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Data(_)) => Some(upsert(is_dir)),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(upsert(is_dir)),
        EventKind::Remove(_) => Some(SyncOp::Delete),
        _ => None,
    }
}

fn upsert(is_dir: bool) -> SyncOp {
    if is_dir {
        SyncOp::UpsertDir
    } else {
        SyncOp::UpsertFile
    }
}

/// Source-relative resource path for an absolute watched path.
///
/// `None` for paths outside the source dir, outside every resource root, or
/// with a dot-prefixed component (editor droppings, VCS metadata).
pub fn resource_rel(source_dir: &Path, path: &Path) -> Option<PathBuf> {
    let rel = path.strip_prefix(source_dir).ok()?;
    let hidden = rel
        .components()
        .any(|c| resource::is_hidden(c.as_os_str()));
    if hidden {
        return None;
    }
    ResourceRoot::containing(rel)?;
    Some(rel.to_path_buf())
}
