//! # mozdoc-core
//!
//! Domain types and leaf helpers for the mozdoc documentation builder:
//! the immutable [`RepoSnapshot`] captured once per invocation, GitHub URL
//! derivation from a remote URL, and `config.json` loading/merging.

pub mod config;
pub mod error;
pub mod repo;
pub mod types;
pub mod urls;

pub use error::{ConfigError, RepoError, UrlError};
pub use types::{BranchName, RepoSnapshot, ResourceRoot};
