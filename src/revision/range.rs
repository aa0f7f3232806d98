//! Revision range expansion
//!
//! Accepts a single revision (`42`), a comma-separated list (`3,7`), an
//! inclusive range (`2-4`) or any mix of those (`1,3-5,9`).

use crate::error::{PatchError, Result};

/// Expand a revision spec into the ordered list of revisions to process.
///
/// Groups keep their left-to-right order and ranges expand ascending.
/// Duplicates are kept. A descending range contributes nothing, and a group
/// with more than one dash is skipped with a warning. Any component that is
/// not a non-negative integer fails the whole spec.
pub fn expand(spec: &str) -> Result<Vec<u64>> {
    let mut revisions = Vec::new();

    for group in spec.split(',').map(str::trim) {
        if group.is_empty() {
            tracing::warn!("Skipping empty group in revision spec '{}'", spec);
            continue;
        }

        if !group.contains('-') {
            revisions.push(parse_revision(spec, group)?);
            continue;
        }

        let parts: Vec<&str> = group.split('-').map(str::trim).collect();
        let [start, end] = parts.as_slice() else {
            tracing::warn!("Skipping malformed range '{}' in revision spec '{}'", group, spec);
            continue;
        };
        let start = parse_revision(spec, start)?;
        let end = parse_revision(spec, end)?;
        if start > end {
            tracing::debug!("Range '{}' is descending, contributes no revisions", group);
        }
        revisions.extend(start..=end);
    }

    Ok(revisions)
}

fn parse_revision(spec: &str, token: &str) -> Result<u64> {
    token
        .parse::<u64>()
        .map_err(|_| PatchError::invalid_spec(spec, format!("'{token}' is not a revision number")))
}
