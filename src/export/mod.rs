//! Incremental export: map changed paths to a staging folder, export their
//! content, and drive batches of revisions.

pub mod batch;
pub mod orchestrator;
pub mod paths;
pub mod staging;

pub use batch::{BatchDriver, BatchReport, RevisionOutcome};
pub use orchestrator::{ExportOrchestrator, RevisionExport};
pub use paths::{branch_relative, map_to_local, rebase_url};
pub use staging::{CleanupState, StagingFolder};
