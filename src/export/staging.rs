//! Staging folder lifecycle
//!
//! The staging folder accumulates exported files for one unit of work. In
//! combined mode the unit is the whole batch, so the folder is wiped once; in
//! individual mode every revision is its own unit and the folder is wiped
//! before each one.

use crate::domain::ArchiveMode;
use crate::error::{IoContext, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Whether the staging folder has already been wiped during the current batch.
///
/// Owned by the batch driver and passed explicitly to
/// [`StagingFolder::prepare_for_unit`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupState {
    cleaned: bool,
}

impl CleanupState {
    pub(crate) fn is_cleaned(&self) -> bool {
        self.cleaned
    }
}

#[derive(Debug, Clone)]
pub struct StagingFolder {
    root: PathBuf,
}

impl StagingFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Wipe the folder if `mode` requires it for the next unit of work.
    ///
    /// Returns `true` when the folder was wiped.
    pub fn prepare_for_unit(&self, mode: ArchiveMode, state: &mut CleanupState) -> Result<bool> {
        let wipe = match mode {
            ArchiveMode::Individual => true,
            ArchiveMode::Combined => !state.cleaned,
        };
        if !wipe {
            return Ok(false);
        }
        self.wipe()?;
        state.cleaned = true;
        Ok(true)
    }

    /// Recursively delete the folder. A missing folder is not an error.
    pub fn wipe(&self) -> Result<()> {
        tracing::info!("Cleaning out staging folder {}", self.root.display());
        match fs::remove_dir_all(&self.root) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            other => other.at_path(&self.root),
        }
    }

    pub fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.root).at_path(&self.root)
    }

    /// Archives are written beside the staging folder, not inside it.
    pub fn archive_path(&self, file_name: &str) -> PathBuf {
        match self.root.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}
