//! Core domain types shared between the classifier, exporter and renderers.

use crate::error::PatchError;
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::str::FromStr;

/// How a path differs between two revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// Single-letter code used in diff files.
    pub fn code(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'A' => Some(Self::Added),
            'M' => Some(Self::Modified),
            'D' => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Whether the path's content should be materialised in an export.
    pub fn is_exported(self) -> bool {
        !matches!(self, Self::Deleted)
    }
}

/// One path that differs between two revisions of a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub kind: ChangeKind,
    /// Full repository URL as reported by the VCS.
    pub url: String,
}

impl ChangeEntry {
    pub fn new(kind: ChangeKind, url: impl Into<String>) -> Self {
        Self { kind, url: url.into() }
    }
}

/// Encodes as `<code> <url>`, the line format of diff files.
impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.code(), self.url)
    }
}

impl FromStr for ChangeEntry {
    type Err = PatchError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        let Some(code) = chars.next() else {
            return Err(PatchError::malformed(line, "empty entry"));
        };
        let kind = ChangeKind::from_code(code)
            .ok_or_else(|| PatchError::malformed(line, format!("unknown status code '{code}'")))?;
        let rest = chars.as_str();
        if !rest.starts_with(char::is_whitespace) {
            return Err(PatchError::malformed(line, "status code must be followed by a separator"));
        }
        let url = rest.trim();
        if url.is_empty() {
            return Err(PatchError::malformed(line, "missing path"));
        }
        Ok(Self::new(kind, url))
    }
}

/// Commit metadata recorded next to each exported revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionDescriptor {
    /// Branch URL the revision was exported from.
    pub branch_url: String,
    pub committed_date: DateTime<FixedOffset>,
    pub committed_revision: u64,
}

/// How a batch of revisions is packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveMode {
    /// One archive per revision; staging is wiped before every revision.
    Individual,
    /// One archive for the whole batch; staging is wiped once up front.
    Combined,
}

#[cfg(test)]
mod tests {
    use super::{ChangeEntry, ChangeKind};
    use crate::error::PatchError;

    #[test]
    fn parses_encoded_entry() {
        let entry: ChangeEntry = "M http://svn/repo/trunk/src/a.txt".parse().expect("entry");
        assert_eq!(entry.kind, ChangeKind::Modified);
        assert_eq!(entry.url, "http://svn/repo/trunk/src/a.txt");
    }

    #[test]
    fn tolerates_padding_between_code_and_url() {
        let entry: ChangeEntry = "  A      http://svn/repo/trunk/b.txt \n".parse().expect("entry");
        assert_eq!(entry, ChangeEntry::new(ChangeKind::Added, "http://svn/repo/trunk/b.txt"));
    }

    #[test]
    fn rejects_unknown_status_code() {
        let err = "? http://svn/repo/trunk/x".parse::<ChangeEntry>().unwrap_err();
        assert!(matches!(err, PatchError::MalformedChangeEntry { .. }));
    }

    #[test]
    fn rejects_code_glued_to_url() {
        assert!("Mhttp://svn/repo/trunk/x".parse::<ChangeEntry>().is_err());
    }

    #[test]
    fn display_matches_parse_format() {
        let entry = ChangeEntry::new(ChangeKind::Deleted, "http://svn/repo/trunk/old.txt");
        assert_eq!(entry.to_string(), "D http://svn/repo/trunk/old.txt");
    }

    #[test]
    fn deleted_paths_are_not_exported() {
        assert!(ChangeKind::Added.is_exported());
        assert!(ChangeKind::Modified.is_exported());
        assert!(!ChangeKind::Deleted.is_exported());
    }
}
