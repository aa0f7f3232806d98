//! Change-set computation and diff file persistence.

pub mod classify;
pub mod diff_file;

pub use classify::{classify, classify_locations};
pub use diff_file::{read_diff_file, write_diff_file};
