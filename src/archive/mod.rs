//! Zip packaging of a staging folder
//!
//! Archives are written to a temporary sibling file and renamed into place, so
//! an interrupted run never leaves a truncated `export-<N>.zip` behind.

use crate::error::{IoContext, PatchError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive name for a single revision.
pub fn revision_archive_name(revision: u64) -> String {
    format!("export-{revision}.zip")
}

/// Archive name for a combined batch, identified by its first and last revision.
pub fn batch_archive_name(revisions: &[u64]) -> Option<String> {
    match revisions {
        [] => None,
        [only] => Some(revision_archive_name(*only)),
        [first, .., last] => Some(format!("export-{first}-{last}.zip")),
    }
}

/// Default destination for `zip <path>`: `<path>.zip` beside the source.
pub fn sibling_archive_path(source: &Path) -> Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| {
        PatchError::Configuration(format!("cannot derive an archive name from {}", source.display()))
    })?;
    let mut file_name = name.to_os_string();
    file_name.push(".zip");
    Ok(source.with_file_name(file_name))
}

/// Package `source` (a directory tree or a single file) into a zip at `dest`.
///
/// Directory entries are stored relative to `source` with `/` separators.
/// Returns the number of files written.
pub fn archive_path(source: &Path, dest: &Path) -> Result<usize> {
    if !source.exists() {
        return Err(PatchError::io(
            source,
            io::Error::new(io::ErrorKind::NotFound, "archive source not found"),
        ));
    }

    let temp = dest.with_extension("zip.tmp");
    match write_archive(source, &temp) {
        Ok(count) => {
            fs::rename(&temp, dest).at_path(dest)?;
            tracing::info!("Wrote {} ({} files)", dest.display(), count);
            Ok(count)
        }
        Err(e) => {
            let _ = fs::remove_file(&temp);
            Err(e)
        }
    }
}

fn write_archive(source: &Path, temp: &Path) -> Result<usize> {
    let file = File::create(temp).at_path(temp)?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let zip_err = |e: zip::result::ZipError| PatchError::io(temp, io::Error::other(e));

    let mut count = 0;
    if source.is_file() {
        let name = source.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        writer.start_file(name, options).map_err(zip_err)?;
        copy_into(source, &mut writer)?;
        count += 1;
    } else {
        for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source).to_path_buf();
                PatchError::io(path, io::Error::other(e))
            })?;
            let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if entry.file_type().is_dir() {
                writer.add_directory(format!("{name}/"), options).map_err(zip_err)?;
            } else {
                writer.start_file(name, options).map_err(zip_err)?;
                copy_into(entry.path(), &mut writer)?;
                count += 1;
            }
        }
    }

    writer.finish().map_err(zip_err)?;
    Ok(count)
}

fn copy_into<W: io::Write + io::Seek>(path: &Path, writer: &mut ZipWriter<W>) -> Result<()> {
    let mut input = File::open(path).at_path(path)?;
    io::copy(&mut input, writer).at_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{archive_path, batch_archive_name, revision_archive_name, sibling_archive_path};
    use std::fs::{self, File};
    use std::io::Read;
    use std::path::Path;
    use tempfile::TempDir;

    fn entry_names(zip_path: &Path) -> Vec<String> {
        let archive = zip::ZipArchive::new(File::open(zip_path).expect("open")).expect("zip");
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn archives_directory_tree_relative_to_root() {
        let tmp = TempDir::new().expect("tmp");
        let src = tmp.path().join("export");
        fs::create_dir_all(src.join("src/net")).expect("mkdir");
        fs::write(src.join("src/net/http.c"), "int main;").expect("write");
        fs::write(src.join("revision-10.txt"), "Revision: 10\n").expect("write");
        let dest = tmp.path().join(revision_archive_name(10));

        let count = archive_path(&src, &dest).expect("archive");

        assert_eq!(count, 2);
        assert_eq!(
            entry_names(&dest),
            vec!["revision-10.txt", "src/", "src/net/", "src/net/http.c"]
        );
        assert!(!tmp.path().join("export-10.zip.tmp").exists());

        let mut archive = zip::ZipArchive::new(File::open(&dest).expect("open")).expect("zip");
        let mut content = String::new();
        archive
            .by_name("src/net/http.c")
            .expect("entry")
            .read_to_string(&mut content)
            .expect("read");
        assert_eq!(content, "int main;");
    }

    #[test]
    fn archives_single_file_under_its_name() {
        let tmp = TempDir::new().expect("tmp");
        let src = tmp.path().join("notes.txt");
        fs::write(&src, "hello").expect("write");
        let dest = sibling_archive_path(&src).expect("dest");

        archive_path(&src, &dest).expect("archive");
        assert_eq!(dest, tmp.path().join("notes.txt.zip"));
        assert_eq!(entry_names(&dest), vec!["notes.txt"]);
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        assert!(archive_path(&tmp.path().join("nope"), &tmp.path().join("nope.zip")).is_err());
        assert!(!tmp.path().join("nope.zip").exists());
    }

    #[test]
    fn batch_names() {
        assert_eq!(batch_archive_name(&[10]).as_deref(), Some("export-10.zip"));
        assert_eq!(batch_archive_name(&[10, 11, 14]).as_deref(), Some("export-10-14.zip"));
        assert_eq!(batch_archive_name(&[]), None);
    }
}
