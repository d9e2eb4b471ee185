//! ZIP bundle writer.
//!
//! Snapshots the workspace into a single deflate-compressed archive. The
//! layout is flat: every regular file in the workspace becomes a top-level
//! entry named by its file name only, in sorted order so a given workspace
//! state always produces the same archive layout.

use crate::error::Result;
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Result of writing a bundle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BundleSummary {
    /// Entry names, in archive order.
    pub entries: Vec<String>,
    /// Size of the finished archive in bytes.
    pub archive_bytes: u64,
}

/// Suggested archive file name for a source document.
///
/// `Report.docx` → `Report_bundle.zip`.
#[must_use]
pub fn suggested_bundle_name(source: &Path) -> String {
    let base = source.file_stem().unwrap_or_default().to_string_lossy();
    format!("{base}_bundle.zip")
}

/// Write every regular file in `dir` into a deflate-compressed ZIP at `dest`.
///
/// Entries are flat (file names only, no directory paths) and sorted by
/// name. Names listed in `skip` are left out of the archive; this is how
/// the staged source copy is excluded when the caller asks for it.
/// Subdirectories are never descended into.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, the destination cannot
/// be created, or the archive cannot be written. A failed write leaves no
/// usable archive behind.
pub fn write_bundle(dir: &Path, dest: &Path, skip: &[String]) -> Result<BundleSummary> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    let out = File::create(dest)?;
    let mut writer = ZipWriter::new(BufWriter::new(out));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::new();
    for path in &files {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if skip.iter().any(|s| s == &name) {
            debug!("excluding {name} from bundle");
            continue;
        }
        writer.start_file(name.as_str(), options)?;
        let mut input = File::open(path)?;
        io::copy(&mut input, &mut writer)?;
        entries.push(name);
    }
    writer.finish()?;

    let archive_bytes = fs::metadata(dest)?.len();
    debug!(
        "wrote bundle {} ({} entries, {archive_bytes} bytes)",
        dest.display(),
        entries.len()
    );
    Ok(BundleSummary {
        entries,
        archive_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn read_entry_names(path: &Path) -> Vec<String> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_suggested_bundle_name() {
        assert_eq!(
            suggested_bundle_name(Path::new("/docs/Report.docx")),
            "Report_bundle.zip"
        );
        assert_eq!(
            suggested_bundle_name(Path::new("notes.docx")),
            "notes_bundle.zip"
        );
    }

    #[test]
    fn test_write_bundle_flat_and_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["Report.txt", "Report.html", "Report.docx"] {
            fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("ignored.txt"), b"x").unwrap();

        let dest = dir.path().join("out.zip");
        let summary = write_bundle(dir.path(), &dest, &[]).unwrap();

        // "out.zip" itself is created inside dir after the enumeration, so it
        // is never its own entry.
        assert_eq!(
            summary.entries,
            ["Report.docx", "Report.html", "Report.txt"]
        );
        assert_eq!(read_entry_names(&dest), summary.entries);
        assert!(summary.archive_bytes > 0);
    }

    #[test]
    fn test_write_bundle_skip_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Report.docx"), b"source").unwrap();
        fs::write(dir.path().join("Report.txt"), b"text").unwrap();

        let dest = dir.path().join("out.zip");
        let summary =
            write_bundle(dir.path(), &dest, &["Report.docx".to_string()]).unwrap();

        assert_eq!(summary.entries, ["Report.txt"]);
        assert_eq!(read_entry_names(&dest), ["Report.txt"]);
    }

    #[test]
    fn test_write_bundle_empty_workspace() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.zip");
        let summary = write_bundle(dir.path(), &dest, &[]).unwrap();
        assert!(summary.entries.is_empty());
        assert!(dest.exists());
    }

    #[test]
    fn test_entry_contents_round_trip() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Report.txt"), b"First paragraph.\n\n").unwrap();

        let dest = dir.path().join("out.zip");
        write_bundle(dir.path(), &dest, &[]).unwrap();

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut entry = archive.by_name("Report.txt").unwrap();
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "First paragraph.\n\n");
    }
}
