//! Revision command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::open_session;
use super::GlobalOptions;
use crate::domain::RevisionDescriptor;
use crate::render::write_descriptor;
use crate::vcs::VcsSession;

#[derive(Args)]
pub struct RevisionArgs {
    /// Branch to describe
    #[arg(value_name = "BRANCH_URL")]
    pub branch: String,

    /// Descriptor file to write
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,
}

pub fn run(args: RevisionArgs, globals: &GlobalOptions) -> Result<()> {
    tracing::info!("Command: revision");
    let (_, session) = open_session(&globals.config)?;

    let info = session.info(&args.branch, None, None)?;
    let descriptor = RevisionDescriptor {
        branch_url: info.url,
        committed_date: info.committed_date,
        committed_revision: info.committed_revision,
    };
    write_descriptor(&descriptor, &args.output)?;

    println!("Wrote revision {} to {}", descriptor.committed_revision, args.output.display());
    Ok(())
}
