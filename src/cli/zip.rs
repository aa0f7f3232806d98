//! Zip command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::require_exists;
use crate::archive::{archive_path, sibling_archive_path};

#[derive(Args)]
pub struct ZipArgs {
    /// Directory or file to archive
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

pub fn run(args: ZipArgs) -> Result<()> {
    tracing::info!("Command: zip");
    require_exists(&args.path, "zip target dir/file")?;

    let dest = sibling_archive_path(&args.path)?;
    let count = archive_path(&args.path, &dest)?;
    println!("Zipped {} files into {}", count, dest.display());
    Ok(())
}
