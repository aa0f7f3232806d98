//! svn-patch: incremental update packages for Subversion exports
//!
//! Computes the paths that changed between revisions of a branch, exports only
//! those files into a staging folder, records revision metadata and archives
//! the result, so a baseline export can be patched forward without a full
//! re-export.

pub mod archive;
pub mod changes;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;
pub mod revision;
pub mod vcs;

pub use error::{PatchError, Result};
