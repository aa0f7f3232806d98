//! svn-patch: patch a baseline Subversion export forward to a newer revision.

use anyhow::Result;

fn main() -> Result<()> {
    svn_patch::cli::run()
}
