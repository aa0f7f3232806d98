//! Error taxonomy shared by every layer below the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while computing, exporting or packaging a change set.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid revision spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    #[error("VCS operation failed: {0}")]
    VcsQuery(String),

    #[error("Malformed change entry '{entry}': {reason}")]
    MalformedChangeEntry { entry: String, reason: String },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PatchError>;

impl PatchError {
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec { spec: spec.into(), reason: reason.into() }
    }

    pub fn malformed(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedChangeEntry { entry: entry.into(), reason: reason.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Whether a failure only invalidates the revision being processed.
    ///
    /// The batch driver logs these and moves on to the next revision; anything
    /// else aborts the run.
    pub fn is_revision_scoped(&self) -> bool {
        match self {
            Self::VcsQuery(_) | Self::MalformedChangeEntry { .. } | Self::Io { .. } => true,
            // A revision without a predecessor is rejected per revision, not per run.
            Self::InvalidSpec { .. } => true,
            Self::Configuration(_) => false,
        }
    }
}

/// Attach a path to a raw IO error, mirroring `anyhow::Context` for the typed layer.
pub trait IoContext<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| PatchError::io(path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::PatchError;

    #[test]
    fn configuration_errors_abort_the_batch() {
        assert!(!PatchError::Configuration("no url".into()).is_revision_scoped());
        assert!(PatchError::VcsQuery("timeout".into()).is_revision_scoped());
        assert!(PatchError::malformed("X foo", "bad code").is_revision_scoped());
    }

    #[test]
    fn io_error_message_names_the_path() {
        let err = PatchError::io(
            "export/a.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("export/a.txt"));
    }
}
