//! Batch driver: run the exporter over a sequence of revisions
//!
//! Failures are isolated per revision. A revision that fails is logged and
//! the batch moves on; only errors that are not revision-scoped abort the run.

use super::orchestrator::{ExportOrchestrator, RevisionExport};
use super::staging::{CleanupState, StagingFolder};
use crate::archive::{archive_path, batch_archive_name, revision_archive_name};
use crate::domain::ArchiveMode;
use crate::error::Result;
use crate::revision::expand;
use crate::vcs::VcsSession;
use std::path::PathBuf;

/// What happened to one revision of a batch.
#[derive(Debug)]
pub struct RevisionOutcome {
    pub revision: u64,
    pub result: Result<RevisionReport>,
}

#[derive(Debug)]
pub struct RevisionReport {
    pub export: RevisionExport,
    /// Archive written for this revision (individual mode only).
    pub archive: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RevisionOutcome>,
    /// Archive covering the whole batch (combined mode only).
    pub combined_archive: Option<PathBuf>,
    /// Failed revisions whose partial output may be in the combined archive.
    pub partial_revisions: Vec<u64>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &RevisionOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

pub struct BatchDriver<'a> {
    orchestrator: ExportOrchestrator<'a>,
    staging: StagingFolder,
}

impl<'a> BatchDriver<'a> {
    pub fn new(session: &'a dyn VcsSession, staging: StagingFolder) -> Self {
        Self { orchestrator: ExportOrchestrator::new(session), staging }
    }

    /// Expand `spec` and export every revision it names from `branch_root`.
    pub fn run(&self, branch_root: &str, spec: &str, mode: ArchiveMode) -> Result<BatchReport> {
        let revisions = expand(spec)?;
        self.run_revisions(branch_root, &revisions, mode)
    }

    pub fn run_revisions(
        &self,
        branch_root: &str,
        revisions: &[u64],
        mode: ArchiveMode,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        if revisions.is_empty() {
            tracing::warn!("Revision spec selected no revisions; nothing to export");
            return Ok(report);
        }
        if revisions.len() > 1 {
            tracing::info!("Exporting {} revisions ({:?} mode)", revisions.len(), mode);
        }

        let mut cleanup = CleanupState::default();
        for &revision in revisions {
            tracing::info!("Exporting revision {}", revision);
            match self.process_revision(branch_root, revision, mode, &mut cleanup) {
                Err(e) if !e.is_revision_scoped() => return Err(e),
                result => {
                    if let Err(e) = &result {
                        tracing::error!("Revision {} failed: {}", revision, e);
                    }
                    report.outcomes.push(RevisionOutcome { revision, result });
                }
            }
        }

        if mode == ArchiveMode::Combined {
            let failed: Vec<u64> = report.failed().map(|o| o.revision).collect();
            let archive = self.archive_batch(revisions, report.succeeded())?;
            if let Some(archive) = &archive {
                if !failed.is_empty() {
                    tracing::warn!(
                        "{} may hold partial output of failed revisions {:?}",
                        archive.display(),
                        failed
                    );
                    report.partial_revisions = failed;
                }
            }
            report.combined_archive = archive;
        }
        Ok(report)
    }

    fn process_revision(
        &self,
        branch_root: &str,
        revision: u64,
        mode: ArchiveMode,
        cleanup: &mut CleanupState,
    ) -> Result<RevisionReport> {
        self.staging.prepare_for_unit(mode, cleanup)?;
        let export = self.orchestrator.export_revision(branch_root, revision, self.staging.root())?;

        let archive = match mode {
            ArchiveMode::Individual => {
                let dest = self.staging.archive_path(&revision_archive_name(revision));
                archive_path(self.staging.root(), &dest)?;
                Some(dest)
            }
            ArchiveMode::Combined => None,
        };
        Ok(RevisionReport { export, archive })
    }

    fn archive_batch(&self, revisions: &[u64], succeeded: usize) -> Result<Option<PathBuf>> {
        if succeeded == 0 {
            tracing::warn!("No revision exported successfully; skipping combined archive");
            return Ok(None);
        }
        let Some(name) = batch_archive_name(revisions) else {
            return Ok(None);
        };
        let dest = self.staging.archive_path(&name);
        archive_path(self.staging.root(), &dest)?;
        Ok(Some(dest))
    }
}
