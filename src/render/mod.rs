//! Output rendering for exported revisions.

pub mod descriptor;

pub use descriptor::{descriptor_file_name, render_descriptor, write_descriptor};
