//! Single-revision export
//!
//! Classifies the changes a revision introduced, exports every added or
//! modified path into the staging folder and records the revision's commit
//! metadata beside them. Deleted paths are never materialised; consumers of
//! the package prune removed files by other means.

use super::paths::{map_to_local, rebase_url};
use crate::changes::classify;
use crate::domain::{ChangeEntry, RevisionDescriptor};
use crate::error::{IoContext, PatchError, Result};
use crate::render::{descriptor_file_name, write_descriptor};
use crate::vcs::{Location, VcsSession};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of exporting one revision into a staging folder.
#[derive(Debug, Clone)]
pub struct RevisionExport {
    pub descriptor: RevisionDescriptor,
    pub descriptor_path: PathBuf,
    /// Local files written, in export order.
    pub exported: Vec<PathBuf>,
    pub skipped_deletions: usize,
}

/// Counts from exporting a list of changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: Vec<PathBuf>,
    pub skipped_deletions: usize,
}

pub struct ExportOrchestrator<'a> {
    session: &'a dyn VcsSession,
}

impl<'a> ExportOrchestrator<'a> {
    pub fn new(session: &'a dyn VcsSession) -> Self {
        Self { session }
    }

    /// Export the changes `revision` made to `branch_root` into `staging_root`.
    ///
    /// The staging folder is created if needed but never wiped here. The first
    /// failed export aborts the revision and leaves the staging folder as-is.
    pub fn export_revision(
        &self,
        branch_root: &str,
        revision: u64,
        staging_root: &Path,
    ) -> Result<RevisionExport> {
        let previous = revision.checked_sub(1).ok_or_else(|| {
            PatchError::invalid_spec(revision.to_string(), "revision 0 has no predecessor")
        })?;

        fs::create_dir_all(staging_root).at_path(staging_root)?;

        let entries = classify(self.session, branch_root, previous, revision)?;
        tracing::info!("Revision {}: {} changed paths", revision, entries.len());

        let summary = self.export_entries(&entries, branch_root, staging_root, |entry| {
            Ok(Location::at(entry.url.clone(), revision))
        })?;

        let info = self.session.info(branch_root, Some(previous), Some(revision))?;
        let descriptor = RevisionDescriptor {
            branch_url: info.url,
            committed_date: info.committed_date,
            committed_revision: info.committed_revision,
        };
        let descriptor_path = staging_root.join(descriptor_file_name(revision));
        write_descriptor(&descriptor, &descriptor_path)?;

        Ok(RevisionExport {
            descriptor,
            descriptor_path,
            exported: summary.exported,
            skipped_deletions: summary.skipped_deletions,
        })
    }

    /// Export entries classified between two branches: local paths are taken
    /// relative to `old_root`, content comes from the same relative path under
    /// `new_root` at HEAD.
    pub fn export_branch_changes(
        &self,
        entries: &[ChangeEntry],
        old_root: &str,
        new_root: &str,
        target: &Path,
    ) -> Result<ExportSummary> {
        fs::create_dir_all(target).at_path(target)?;
        self.export_entries(entries, old_root, target, |entry| {
            Ok(Location::head(rebase_url(&entry.url, old_root, new_root)?))
        })
    }

    fn export_entries<F>(
        &self,
        entries: &[ChangeEntry],
        branch_root: &str,
        staging_root: &Path,
        source_of: F,
    ) -> Result<ExportSummary>
    where
        F: Fn(&ChangeEntry) -> Result<Location>,
    {
        let mut summary = ExportSummary::default();
        for entry in entries {
            if !entry.kind.is_exported() {
                tracing::debug!("Skipping deletion {}", entry.url);
                summary.skipped_deletions += 1;
                continue;
            }
            let dest = map_to_local(entry, branch_root, staging_root)?;
            let source = source_of(entry)?;
            tracing::debug!("export({}) -> {}", entry, dest.display());
            self.session.export_file(&source, &dest)?;
            summary.exported.push(dest);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::ExportOrchestrator;
    use crate::domain::{ChangeEntry, ChangeKind};
    use crate::error::PatchError;
    use crate::vcs::memory::MemorySession;
    use crate::vcs::{DiffStatus, Location, StatusKind};
    use std::fs;
    use tempfile::TempDir;

    const TRUNK: &str = "http://svn.example.com/repo/trunk";

    fn url(path: &str) -> String {
        format!("{TRUNK}/{path}")
    }

    #[test]
    fn exports_added_and_modified_but_not_deleted() {
        let tmp = TempDir::new().expect("tmp");
        let staging = tmp.path().join("export");
        let session = MemorySession::new(11)
            .with_summary(
                Location::at(TRUNK, 11),
                vec![
                    DiffStatus::new(StatusKind::Added, url("src/new.c")),
                    DiffStatus::new(StatusKind::Modified, url("src/old.c")),
                    DiffStatus::new(StatusKind::Deleted, url("src/gone.c")),
                ],
            )
            .with_content(&url("src/new.c"), "new")
            .with_content(&url("src/old.c"), "changed");

        let export = ExportOrchestrator::new(&session)
            .export_revision(TRUNK, 11, &staging)
            .expect("export");

        assert_eq!(export.exported.len(), 2);
        assert_eq!(export.skipped_deletions, 1);
        assert_eq!(fs::read_to_string(staging.join("src/new.c")).expect("new"), "new");
        assert_eq!(fs::read_to_string(staging.join("src/old.c")).expect("old"), "changed");
        assert!(!staging.join("src/gone.c").exists());

        let exported: Vec<Location> = session.exports().into_iter().map(|(loc, _)| loc).collect();
        assert_eq!(
            exported,
            vec![Location::at(url("src/new.c"), 11), Location::at(url("src/old.c"), 11)]
        );
    }

    #[test]
    fn writes_descriptor_named_after_revision() {
        let tmp = TempDir::new().expect("tmp");
        let staging = tmp.path().join("export");
        let session = MemorySession::new(11);

        let export = ExportOrchestrator::new(&session)
            .export_revision(TRUNK, 11, &staging)
            .expect("export");

        assert_eq!(export.descriptor_path, staging.join("revision-11.txt"));
        assert_eq!(export.descriptor.committed_revision, 11);
        let text = fs::read_to_string(&export.descriptor_path).expect("descriptor");
        assert_eq!(text, "Branch:   trunk\nUpdated:  25-Jan-2010 14:03\nRevision: 11\n");
    }

    #[test]
    fn failed_export_aborts_revision_and_keeps_partial_output() {
        let tmp = TempDir::new().expect("tmp");
        let staging = tmp.path().join("export");
        let session = MemorySession::new(7)
            .with_summary(
                Location::at(TRUNK, 7),
                (1..=5).map(|i| DiffStatus::new(StatusKind::Modified, url(&format!("f{i}.txt")))).collect(),
            )
            .failing_export(&url("f3.txt"));

        let err = ExportOrchestrator::new(&session).export_revision(TRUNK, 7, &staging).unwrap_err();

        assert!(matches!(err, PatchError::VcsQuery(_)));
        assert_eq!(session.exports().len(), 2, "exports stop at the failing path");
        assert!(staging.join("f2.txt").exists());
        assert!(!staging.join("f4.txt").exists());
        assert!(!staging.join("revision-7.txt").exists());
    }

    #[test]
    fn revision_zero_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let session = MemorySession::new(0);
        let err = ExportOrchestrator::new(&session)
            .export_revision(TRUNK, 0, tmp.path())
            .unwrap_err();
        assert!(matches!(err, PatchError::InvalidSpec { .. }));
    }

    #[test]
    fn branch_changes_export_from_new_branch_head() {
        let tmp = TempDir::new().expect("tmp");
        let old = "http://svn.example.com/repo/branches/rel-1";
        let new = "http://svn.example.com/repo/branches/rel-2";
        let session = MemorySession::new(50).with_content(&format!("{new}/lib/a.c"), "v2");
        let entries = vec![
            ChangeEntry::new(ChangeKind::Modified, format!("{old}/lib/a.c")),
            ChangeEntry::new(ChangeKind::Deleted, format!("{old}/lib/b.c")),
        ];

        let summary = ExportOrchestrator::new(&session)
            .export_branch_changes(&entries, old, new, tmp.path())
            .expect("export");

        assert_eq!(summary.exported, vec![tmp.path().join("lib").join("a.c")]);
        assert_eq!(summary.skipped_deletions, 1);
        assert_eq!(fs::read_to_string(tmp.path().join("lib/a.c")).expect("read"), "v2");
        assert_eq!(session.exports()[0].0, Location::head(format!("{new}/lib/a.c")));
    }
}
