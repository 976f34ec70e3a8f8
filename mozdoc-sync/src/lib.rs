//! # mozdoc-sync
//!
//! Resource sync engine and staging-tree preparation.
//!
//! [`resource::sync_all`] bulk-syncs the author's resource roots into a
//! staging content tree; [`resource::apply`] maps one filesystem change to
//! exactly one copy/delete operation during a serve session.
//! [`staging::prepare`] materializes the generator skeleton.

pub mod error;
pub mod resource;
pub mod staging;

pub use error::SyncError;
pub use resource::{apply, dest_path, sync_all, SyncOp};
