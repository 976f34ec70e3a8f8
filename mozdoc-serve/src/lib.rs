//! # mozdoc-serve
//!
//! Live preview session: the generator's preview server plus a filesystem
//! watcher that maps each change under a resource root to exactly one
//! incremental sync operation against the staging tree, keeping latency
//! between an author edit and the visible change low.

pub mod error;
pub mod events;
pub mod runtime;

pub use error::ServeError;
pub use runtime::{serve_blocking, ServeOptions};
