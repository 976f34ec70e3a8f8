//! Domain types for mozdoc.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. The repository snapshot is captured once per invocation and passed
//! by reference through the call chain — never held in global state.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed git branch name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BranchName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BranchName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Repository snapshot
// ---------------------------------------------------------------------------

/// State of the documentation repository at invocation time.
///
/// Immutable for the duration of a run; every branch build receives the same
/// snapshot so the rendered branch selector is consistent across branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSnapshot {
    /// The branch HEAD currently points at.
    pub current_branch: BranchName,
    /// Every local branch head, in the order the repository reports them.
    pub branches: Vec<BranchName>,
    /// URL of the `origin` remote, when one is configured.
    pub origin_url: Option<String>,
}

impl RepoSnapshot {
    /// Branch names as plain strings, for template locals.
    pub fn branch_names(&self) -> Vec<String> {
        self.branches.iter().map(|b| b.0.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Resource roots
// ---------------------------------------------------------------------------

/// The fixed top-level author-facing content categories.
///
/// `Documents` is distinguished: its contents map to the root of the
/// generated content tree, while every other root maps to a same-named
/// subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceRoot {
    Documents,
    Images,
    Css,
    Js,
    Prototypes,
}

impl ResourceRoot {
    pub const ALL: [ResourceRoot; 5] = [
        ResourceRoot::Documents,
        ResourceRoot::Images,
        ResourceRoot::Css,
        ResourceRoot::Js,
        ResourceRoot::Prototypes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceRoot::Documents => "documents",
            ResourceRoot::Images => "images",
            ResourceRoot::Css => "css",
            ResourceRoot::Js => "js",
            ResourceRoot::Prototypes => "prototypes",
        }
    }

    /// The resource root a source-relative path falls under, if any.
    pub fn containing(rel: &Path) -> Option<ResourceRoot> {
        let first = rel.components().next()?.as_os_str().to_str()?;
        Self::ALL.iter().copied().find(|r| r.as_str() == first)
    }

    /// Whether this root's contents are flattened into the content-tree root.
    pub fn flattens(&self) -> bool {
        matches!(self, ResourceRoot::Documents)
    }
}

impl fmt::Display for ResourceRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn branch_name_display() {
        assert_eq!(BranchName::from("main").to_string(), "main");
        assert_eq!(BranchName::from(String::from("v2")).as_str(), "v2");
    }

    #[test]
    fn containing_matches_known_roots() {
        assert_eq!(
            ResourceRoot::containing(&PathBuf::from("documents/a/b.md")),
            Some(ResourceRoot::Documents)
        );
        assert_eq!(
            ResourceRoot::containing(&PathBuf::from("images/x.png")),
            Some(ResourceRoot::Images)
        );
        assert_eq!(ResourceRoot::containing(&PathBuf::from("notes/x.md")), None);
    }

    #[test]
    fn only_documents_flattens() {
        for root in ResourceRoot::ALL {
            assert_eq!(root.flattens(), root == ResourceRoot::Documents);
        }
    }

    #[test]
    fn snapshot_branch_names() {
        let snap = RepoSnapshot {
            current_branch: BranchName::from("main"),
            branches: vec![BranchName::from("main"), BranchName::from("v2")],
            origin_url: None,
        };
        assert_eq!(snap.branch_names(), vec!["main", "v2"]);
    }
}
