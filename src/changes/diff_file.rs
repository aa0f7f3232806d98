//! Diff file reading and writing (one `<code> <url>` entry per line).

use crate::domain::ChangeEntry;
use crate::error::{IoContext, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_diff_file(path: &Path, entries: &[ChangeEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).at_path(parent)?;
        }
    }
    let file = fs::File::create(path).at_path(path)?;
    let mut writer = BufWriter::new(file);
    for entry in entries {
        writeln!(writer, "{entry}").at_path(path)?;
    }
    writer.flush().at_path(path)
}

/// Read every entry from a diff file, skipping blank lines.
pub fn read_diff_file(path: &Path) -> Result<Vec<ChangeEntry>> {
    let content = fs::read_to_string(path).at_path(path)?;
    content.lines().filter(|line| !line.trim().is_empty()).map(str::parse).collect()
}
