//! # mozdoc-build
//!
//! Per-branch site build invocation and the branch build orchestrator.
//!
//! [`build_all_branches`] fans out one build task per branch (working tree
//! for the current branch, a fresh clone for every other), joins them all,
//! and writes the redirect artifact exactly once after the fan-in.

pub mod builder;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod redirect;

pub use builder::BuildTask;
pub use error::BuildError;
pub use generator::{GeneratorError, SiteGenerator, Wintersmith};
pub use orchestrator::{
    build_all_blocking, build_all_branches, BranchOutcome, BranchSource, BuildReport,
    GitBranchSource,
};
