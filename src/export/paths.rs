//! Repository URL to local path mapping

use crate::domain::ChangeEntry;
use crate::error::{IoContext, PatchError, Result};
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Path, PathBuf};

/// Strip `branch_root` from `url`, returning the branch-relative part without
/// a leading slash (still percent-encoded, as the VCS reports it).
pub fn branch_relative<'a>(url: &'a str, branch_root: &str) -> Result<&'a str> {
    let root = branch_root.trim_end_matches('/');
    let rest = url
        .strip_prefix(root)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .ok_or_else(|| PatchError::malformed(url, format!("not under branch {branch_root}")))?;
    Ok(rest.trim_start_matches('/'))
}

/// Move `url` from under `old_root` to the same relative path under `new_root`.
pub fn rebase_url(url: &str, old_root: &str, new_root: &str) -> Result<String> {
    let relative = branch_relative(url, old_root)?;
    Ok(format!("{}/{}", new_root.trim_end_matches('/'), relative))
}

/// Compute where `entry` lands beneath `staging_root` and create its parent
/// directories.
///
/// Mapping the same entry again returns the same path.
pub fn map_to_local(entry: &ChangeEntry, branch_root: &str, staging_root: &Path) -> Result<PathBuf> {
    let relative = branch_relative(&entry.url, branch_root)?;

    let mut local = staging_root.to_path_buf();
    let mut depth = 0usize;
    for segment in relative.split('/').filter(|s| !s.is_empty() && *s != ".") {
        let decoded = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|e| PatchError::malformed(&entry.url, format!("invalid path encoding: {e}")))?;
        if decoded == ".." || decoded.contains(['/', '\\']) {
            return Err(PatchError::malformed(&entry.url, "path escapes the branch root"));
        }
        local.push(&*decoded);
        depth += 1;
    }
    if depth == 0 {
        return Err(PatchError::malformed(&entry.url, "entry refers to the branch root itself"));
    }

    if let Some(parent) = local.parent() {
        fs::create_dir_all(parent).at_path(parent)?;
    }
    Ok(local)
}
