//! Change classification between two revisions of a branch

use crate::domain::{ChangeEntry, ChangeKind};
use crate::error::Result;
use crate::vcs::{Location, StatusKind, VcsSession};

/// List the paths under `repo_url` that were added, modified or deleted
/// between `previous` and `current`.
///
/// Entries keep the order the VCS reports them in.
pub fn classify(
    session: &dyn VcsSession,
    repo_url: &str,
    previous: u64,
    current: u64,
) -> Result<Vec<ChangeEntry>> {
    classify_locations(session, &Location::at(repo_url, previous), &Location::at(repo_url, current))
}

/// Classify the differences between two arbitrary locations, e.g. two
/// branches at HEAD.
pub fn classify_locations(
    session: &dyn VcsSession,
    old: &Location,
    new: &Location,
) -> Result<Vec<ChangeEntry>> {
    let statuses = session.diff_summary(old, new)?;
    let total = statuses.len();

    let entries: Vec<ChangeEntry> = statuses
        .into_iter()
        .filter_map(|status| {
            let kind = match status.kind {
                StatusKind::Added => ChangeKind::Added,
                StatusKind::Modified => ChangeKind::Modified,
                StatusKind::Deleted => ChangeKind::Deleted,
                StatusKind::Normal | StatusKind::PropertyOnly | StatusKind::Other(_) => {
                    return None;
                }
            };
            Some(ChangeEntry::new(kind, status.url))
        })
        .collect();

    tracing::debug!(
        "{} -> {}: {} changed paths ({} filtered)",
        old,
        new,
        entries.len(),
        total - entries.len()
    );
    Ok(entries)
}
