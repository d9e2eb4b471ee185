//! Temporary workspace for intermediate conversion outputs.
//!
//! Every bundling run owns exactly one [`Workspace`]: a uniquely-named
//! temporary directory that the converters write into and the bundle writer
//! reads from. The directory is removed when the workspace is dropped, which
//! covers every exit path from the point of creation onward (success,
//! cancelled save, conversion errors, panics unwinding).

use crate::error::Result;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An exclusively-owned temporary directory for one bundling run.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a uniquely-named temporary workspace directory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("docpack-").tempdir()?;
        debug!("created workspace at {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Path of the workspace directory.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy the source document into the workspace as `{base}.docx`.
    ///
    /// Returns the path of the staged copy. The original is never mutated.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the copy fails.
    pub fn stage_source(&self, source: &Path) -> Result<PathBuf> {
        let base = source
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let staged = self.path().join(format!("{base}.docx"));
        fs::copy(source, &staged)?;
        debug!("staged source as {}", staged.display());
        Ok(staged)
    }

    /// Path for an output file inside the workspace.
    #[inline]
    #[must_use]
    pub fn target_path(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Enumerate the regular files currently in the workspace, sorted by name.
    ///
    /// This is the snapshot the bundle writer archives; anything written
    /// after this call is not reflected.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be read.
    pub fn produced_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(self.path())? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Persist the workspace directory instead of removing it on drop.
    ///
    /// Debugging escape hatch for `--keep-workspace`; returns the path the
    /// caller is now responsible for.
    #[must_use = "the returned path is no longer cleaned up automatically"]
    pub fn keep(self) -> PathBuf {
        self.dir.into_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_create_and_drop_removes_directory() {
        let workspace = Workspace::create().unwrap();
        let path = workspace.path().to_path_buf();
        assert!(path.is_dir());

        drop(workspace);
        assert!(!path.exists(), "workspace must not outlive its owner");
    }

    #[test]
    fn test_stage_source_copies_with_docx_name() {
        let source_dir = TempDir::new().unwrap();
        let source = source_dir.path().join("Report.docx");
        fs::write(&source, b"fake docx bytes").unwrap();

        let workspace = Workspace::create().unwrap();
        let staged = workspace.stage_source(&source).unwrap();

        assert_eq!(staged.file_name().unwrap(), "Report.docx");
        assert_eq!(fs::read(&staged).unwrap(), b"fake docx bytes");
        // The original is untouched.
        assert!(source.exists());
    }

    #[test]
    fn test_produced_files_sorted_and_files_only() {
        let workspace = Workspace::create().unwrap();
        for name in ["b.txt", "a.html", "c.pdf"] {
            let mut f = File::create(workspace.target_path(name)).unwrap();
            f.write_all(b"x").unwrap();
        }
        fs::create_dir(workspace.path().join("subdir")).unwrap();

        let files = workspace.produced_files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.html", "b.txt", "c.pdf"]);
    }

    #[test]
    fn test_keep_persists_directory() {
        let workspace = Workspace::create().unwrap();
        let kept = workspace.keep();
        assert!(kept.is_dir());
        fs::remove_dir_all(&kept).unwrap();
    }
}
