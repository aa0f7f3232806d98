//! Export command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::utils::{open_session, require_exists};
use super::GlobalOptions;
use crate::changes::read_diff_file;
use crate::export::ExportOrchestrator;

#[derive(Args)]
pub struct ExportArgs {
    /// Diff file written by the `diff` command
    #[arg(value_name = "DIFF_FILE")]
    pub diff_file: PathBuf,

    /// Branch the diff was computed from
    #[arg(value_name = "OLD_BRANCH_URL")]
    pub old_branch: String,

    /// Branch to export content from
    #[arg(value_name = "NEW_BRANCH_URL")]
    pub new_branch: String,

    /// Directory to export into
    #[arg(value_name = "TARGET_DIR")]
    pub target: PathBuf,
}

pub fn run(args: ExportArgs, globals: &GlobalOptions) -> Result<()> {
    tracing::info!("Command: export");
    require_exists(&args.diff_file, "diff file")?;

    let entries = read_diff_file(&args.diff_file)
        .with_context(|| format!("Failed reading diff file {}", args.diff_file.display()))?;
    let (_, session) = open_session(&globals.config)?;

    let summary = ExportOrchestrator::new(&session).export_branch_changes(
        &entries,
        &args.old_branch,
        &args.new_branch,
        &args.target,
    )?;

    println!(
        "Exported {} files to {} ({} deletions skipped)",
        summary.exported.len(),
        args.target.display(),
        summary.skipped_deletions
    );
    Ok(())
}
