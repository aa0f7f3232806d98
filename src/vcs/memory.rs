//! Scripted in-memory session for exercising the exporter without a server.

use super::{CommitInfo, DiffStatus, Location, VcsSession};
use crate::error::{PatchError, Result};
use chrono::{DateTime, FixedOffset};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct MemorySession {
    /// Summaries keyed by the `new` side of the comparison.
    summaries: HashMap<Location, Vec<DiffStatus>>,
    contents: HashMap<String, String>,
    failing_exports: HashSet<String>,
    failing_summaries: HashSet<Location>,
    head: u64,
    exports: RefCell<Vec<(Location, PathBuf)>>,
}

impl MemorySession {
    pub fn new(head: u64) -> Self {
        Self { head, ..Self::default() }
    }

    pub fn with_summary(mut self, new: Location, statuses: Vec<DiffStatus>) -> Self {
        self.summaries.insert(new, statuses);
        self
    }

    pub fn with_content(mut self, url: &str, content: &str) -> Self {
        self.contents.insert(url.to_string(), content.to_string());
        self
    }

    pub fn failing_export(mut self, url: &str) -> Self {
        self.failing_exports.insert(url.to_string());
        self
    }

    pub fn failing_summary(mut self, new: Location) -> Self {
        self.failing_summaries.insert(new);
        self
    }

    /// Every successful export, in call order.
    pub fn exports(&self) -> Vec<(Location, PathBuf)> {
        self.exports.borrow().clone()
    }

    pub fn commit_date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2010-01-25T14:03:11+00:00").expect("valid fixed date")
    }
}

impl VcsSession for MemorySession {
    fn diff_summary(&self, _old: &Location, new: &Location) -> Result<Vec<DiffStatus>> {
        if self.failing_summaries.contains(new) {
            return Err(PatchError::VcsQuery(format!("summary of {new} failed")));
        }
        Ok(self.summaries.get(new).cloned().unwrap_or_default())
    }

    fn export_file(&self, location: &Location, dest: &Path) -> Result<()> {
        if self.failing_exports.contains(&location.url) {
            return Err(PatchError::VcsQuery(format!("export of {location} failed")));
        }
        let content = self.contents.get(&location.url).cloned().unwrap_or_else(|| location.to_string());
        fs::write(dest, content).map_err(|e| PatchError::io(dest, e))?;
        self.exports.borrow_mut().push((location.clone(), dest.to_path_buf()));
        Ok(())
    }

    fn info(&self, url: &str, _peg: Option<u64>, revision: Option<u64>) -> Result<CommitInfo> {
        Ok(CommitInfo {
            url: url.to_string(),
            committed_revision: revision.unwrap_or(self.head),
            committed_date: Self::commit_date(),
        })
    }
}
