//! Shared CLI utilities.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{load_settings, SvnSettings};
use crate::vcs::SvnCli;

/// Load settings and open the one session every command shares.
pub fn open_session(config: &Path) -> Result<(SvnSettings, SvnCli)> {
    let settings = load_settings(config)?;
    let session = SvnCli::new(&settings)
        .with_context(|| format!("Failed opening Subversion session from {}", config.display()))?;
    Ok((settings, session))
}

/// Fail unless `path` exists, naming what it was supposed to be.
pub fn require_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("{}: {} not found.", what, path.display());
    }
    Ok(())
}
