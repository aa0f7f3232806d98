//! Diff command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::utils::open_session;
use super::GlobalOptions;
use crate::changes::{classify_locations, write_diff_file};
use crate::domain::ChangeKind;
use crate::vcs::Location;

#[derive(Args)]
pub struct DiffArgs {
    /// Branch the baseline export was taken from
    #[arg(value_name = "OLD_BRANCH_URL")]
    pub old_branch: String,

    /// Branch to patch the baseline forward to
    #[arg(value_name = "NEW_BRANCH_URL")]
    pub new_branch: String,

    /// File to write the change list to
    #[arg(value_name = "DIFF_FILE")]
    pub diff_file: PathBuf,
}

pub fn run(args: DiffArgs, globals: &GlobalOptions) -> Result<()> {
    tracing::info!("Command: diff");
    let (_, session) = open_session(&globals.config)?;

    let entries = classify_locations(
        &session,
        &Location::head(args.old_branch.as_str()),
        &Location::head(args.new_branch.as_str()),
    )
    .with_context(|| format!("Failed comparing {} with {}", args.old_branch, args.new_branch))?;

    write_diff_file(&args.diff_file, &entries)?;

    let count = |kind: ChangeKind| entries.iter().filter(|e| e.kind == kind).count();
    println!(
        "Wrote {} changes to {} ({} added, {} modified, {} deleted)",
        entries.len(),
        args.diff_file.display(),
        count(ChangeKind::Added),
        count(ChangeKind::Modified),
        count(ChangeKind::Deleted)
    );
    Ok(())
}
