//! Batch export command implementation (`export_zip` / `export_zips`)

use anyhow::Result;
use clap::Args;

use super::utils::open_session;
use super::GlobalOptions;
use crate::domain::ArchiveMode;
use crate::export::{BatchDriver, StagingFolder};
use crate::revision::expand;

#[derive(Args)]
pub struct BatchArgs {
    /// [BRANCH_URL] REVISIONS; the branch defaults to svn.url. Revisions may be
    /// a single number, a comma-separated list, or ranges such as 3-5
    #[arg(value_name = "ARGS", num_args = 1..=2, required = true)]
    pub targets: Vec<String>,
}

impl BatchArgs {
    fn split(&self) -> (Option<&str>, &str) {
        match self.targets.as_slice() {
            [branch, spec] => (Some(branch.as_str()), spec.as_str()),
            [spec] => (None, spec.as_str()),
            _ => (None, ""),
        }
    }
}

pub fn run(args: BatchArgs, globals: &GlobalOptions, mode: ArchiveMode) -> Result<()> {
    let command = match mode {
        ArchiveMode::Combined => "export_zip",
        ArchiveMode::Individual => "export_zips",
    };
    tracing::info!("Command: {}", command);
    let (branch, spec) = args.split();

    // A bad spec is fatal before any VCS interaction.
    let revisions = expand(spec)?;
    let (settings, session) = open_session(&globals.config)?;
    let branch = match branch {
        Some(branch) => branch.to_string(),
        None => settings.default_url()?.to_string(),
    };

    let driver = BatchDriver::new(&session, StagingFolder::new(&globals.staging_dir));
    let report = driver.run_revisions(&branch, &revisions, mode)?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(rev) => match &rev.archive {
                Some(archive) => println!(
                    "revision {}: {} files -> {}",
                    outcome.revision,
                    rev.export.exported.len(),
                    archive.display()
                ),
                None => {
                    println!("revision {}: {} files", outcome.revision, rev.export.exported.len())
                }
            },
            Err(e) => println!("revision {}: FAILED ({})", outcome.revision, e),
        }
    }
    if let Some(archive) = &report.combined_archive {
        println!("combined archive: {}", archive.display());
    }
    if !report.partial_revisions.is_empty() {
        println!(
            "warning: combined archive may contain partial output of failed revisions {:?}",
            report.partial_revisions
        );
    }
    println!("{} of {} revisions exported", report.succeeded(), report.outcomes.len());
    Ok(())
}
