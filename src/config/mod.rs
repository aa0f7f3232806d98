//! Configuration loading
//!
//! Subversion settings come from a Java-style properties file (`svn.properties`
//! by default), overridden by `SVN_PATCH_*` environment variables.

pub mod loader;

pub use loader::{load_settings, parse_properties, SvnSettings, DEFAULT_PROPERTIES_FILE};
