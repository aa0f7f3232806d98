//! Version-control collaborator
//!
//! Everything the exporter needs from the repository goes through the
//! [`VcsSession`] trait: a recursive change summary between two locations, a
//! single-file export, and commit metadata for a path. A session is created
//! once from credentials and passed by reference to every component.

use crate::error::Result;
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::path::Path;

#[cfg(test)]
pub mod memory;
pub mod svn;

pub use svn::SvnCli;

/// A repository URL pinned to a revision (`None` means HEAD).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub url: String,
    pub revision: Option<u64>,
}

impl Location {
    pub fn at(url: impl Into<String>, revision: u64) -> Self {
        Self { url: url.into(), revision: Some(revision) }
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self { url: url.into(), revision: None }
    }
}

/// Renders as a peg-revision target (`url@rev`).
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.revision {
            Some(rev) => write!(f, "{}@{}", self.url, rev),
            None => write!(f, "{}", self.url),
        }
    }
}

/// Item status reported by a change summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Added,
    Modified,
    Deleted,
    /// Content unchanged.
    Normal,
    /// Only versioned properties changed.
    PropertyOnly,
    Other(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffStatus {
    pub kind: StatusKind,
    pub url: String,
}

impl DiffStatus {
    pub fn new(kind: StatusKind, url: impl Into<String>) -> Self {
        Self { kind, url: url.into() }
    }
}

/// Last-commit metadata for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub url: String,
    pub committed_revision: u64,
    pub committed_date: DateTime<FixedOffset>,
}

/// Blocking access to a version-control server.
pub trait VcsSession {
    /// Recursive (depth infinity) summary of the paths that differ between `old` and `new`.
    fn diff_summary(&self, old: &Location, new: &Location) -> Result<Vec<DiffStatus>>;

    /// Export the single file at `location` to `dest`, overwriting it.
    fn export_file(&self, location: &Location, dest: &Path) -> Result<()>;

    /// Commit metadata for `url`, resolved at `peg` and queried at `revision`.
    fn info(&self, url: &str, peg: Option<u64>, revision: Option<u64>) -> Result<CommitInfo>;
}
