//! Command-line interface for svn-patch
//!
//! Provides the `diff`, `export`, `revision`, `zip`, `export_zip` and
//! `export_zips` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::DEFAULT_PROPERTIES_FILE;
use crate::domain::ArchiveMode;

mod batch;
mod diff;
mod export;
mod revision;
mod utils;
mod zip;

/// Patch a baseline Subversion export forward with incremental update packages
#[derive(Parser)]
#[command(name = "svn-patch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Properties file with svn.url, svn.username and svn.password
    #[arg(short, long, global = true, value_name = "FILE", default_value = DEFAULT_PROPERTIES_FILE)]
    config: PathBuf,

    /// Staging directory for batch exports
    #[arg(long, global = true, value_name = "DIR", default_value = "export")]
    staging_dir: PathBuf,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the paths that differ between two branches to a diff file
    Diff(diff::DiffArgs),

    /// Export every path listed in a diff file from the new branch
    Export(export::ExportArgs),

    /// Write a revision descriptor for the current state of a branch
    Revision(revision::RevisionArgs),

    /// Zip a directory or file into <path>.zip beside it
    Zip(zip::ZipArgs),

    /// Export one or more revisions into a single combined archive
    #[command(name = "export_zip")]
    ExportZip(batch::BatchArgs),

    /// Export one or more revisions into one archive per revision
    #[command(name = "export_zips")]
    ExportZips(batch::BatchArgs),
}

/// Global options shared by every command.
pub struct GlobalOptions {
    pub config: PathBuf,
    pub staging_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let start = Instant::now();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();

    let globals = GlobalOptions { config: cli.config, staging_dir: cli.staging_dir };
    match cli.command {
        Commands::Diff(args) => diff::run(args, &globals)?,
        Commands::Export(args) => export::run(args, &globals)?,
        Commands::Revision(args) => revision::run(args, &globals)?,
        Commands::Zip(args) => zip::run(args)?,
        Commands::ExportZip(args) => batch::run(args, &globals, ArchiveMode::Combined)?,
        Commands::ExportZips(args) => batch::run(args, &globals, ArchiveMode::Individual)?,
    }

    println!("finished. time: {} seconds.", start.elapsed().as_secs());
    Ok(())
}
