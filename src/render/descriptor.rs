//! Revision descriptor files (`revision-<N>.txt`).

use crate::domain::RevisionDescriptor;
use crate::error::{IoContext, Result};
use std::fs;
use std::path::Path;

const DATE_FORMAT: &str = "%d-%b-%Y %H:%M";

pub fn descriptor_file_name(revision: u64) -> String {
    format!("revision-{revision}.txt")
}

/// Reduce a branch URL to its identity: the last path segment.
///
/// `http://svn.example.com/repo/branches/rel-2/` becomes `rel-2`. Values
/// without a scheme are returned unchanged.
pub fn branch_identity(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    match trimmed.split_once("://") {
        Some((_, rest)) => rest.rsplit('/').next().unwrap_or(rest),
        None => trimmed,
    }
}

pub fn render_descriptor(descriptor: &RevisionDescriptor) -> String {
    format!(
        "Branch:   {}\nUpdated:  {}\nRevision: {}\n",
        branch_identity(&descriptor.branch_url),
        descriptor.committed_date.format(DATE_FORMAT),
        descriptor.committed_revision
    )
}

/// Write the descriptor to `path`, replacing any existing file.
pub fn write_descriptor(descriptor: &RevisionDescriptor, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).at_path(parent)?;
        }
    }
    fs::write(path, render_descriptor(descriptor)).at_path(path)
}

#[cfg(test)]
mod tests {
    use super::{branch_identity, descriptor_file_name, write_descriptor};
    use crate::domain::RevisionDescriptor;
    use chrono::DateTime;
    use std::fs;
    use tempfile::TempDir;

    fn descriptor() -> RevisionDescriptor {
        RevisionDescriptor {
            branch_url: "http://svn.example.com/repo/branches/rel-2".to_string(),
            committed_date: DateTime::parse_from_rfc3339("2010-01-25T14:03:11+00:00")
                .expect("date"),
            committed_revision: 1442,
        }
    }

    #[test]
    fn writes_three_fixed_lines() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join(descriptor_file_name(1442));

        write_descriptor(&descriptor(), &path).expect("write");

        let text = fs::read_to_string(&path).expect("read");
        similar_asserts::assert_eq!(
            text,
            "Branch:   rel-2\nUpdated:  25-Jan-2010 14:03\nRevision: 1442\n"
        );
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("revision-1442.txt");
        fs::write(&path, "stale\nstale\nstale\nstale\n").expect("seed");

        write_descriptor(&descriptor(), &path).expect("write");
        assert!(fs::read_to_string(&path).expect("read").starts_with("Branch:   rel-2\n"));
    }

    #[test]
    fn branch_identity_keeps_last_segment() {
        assert_eq!(branch_identity("http://svn.example.com/repo/branches/rel-2/"), "rel-2");
        assert_eq!(branch_identity("svn://host/trunk"), "trunk");
        assert_eq!(branch_identity("https://host"), "host");
        assert_eq!(branch_identity("rel-2"), "rel-2");
    }
}
