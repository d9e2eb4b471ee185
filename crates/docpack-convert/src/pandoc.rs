//! Pandoc engine adapter.
//!
//! Wraps the external `pandoc` binary for DOCX→{HTML, ODT, EPUB}. The binary
//! location is explicit injected configuration (config file or CLI flag,
//! falling back to `pandoc` on PATH), never inferred from process state.

use crate::traits::FormatConverter;
use docpack_core::{DocpackError, Result, TargetFormat};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Handle to a pandoc installation.
#[derive(Debug, Clone)]
pub struct PandocEngine {
    binary: PathBuf,
}

impl PandocEngine {
    /// Create an engine handle for an explicit binary path.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Engine handle resolving `pandoc` from PATH.
    #[must_use]
    pub fn from_path() -> Self {
        Self::new("pandoc")
    }

    /// The configured binary path.
    #[inline]
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Check that pandoc is runnable and return its version line.
    ///
    /// Called once before any work starts; a missing engine is fatal for
    /// the whole run.
    ///
    /// # Errors
    ///
    /// Returns [`DocpackError::EngineMissing`] if the binary cannot be
    /// spawned or exits non-zero.
    pub fn check_available(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|_| {
                DocpackError::EngineMissing(format!(
                    "pandoc not found at '{}'",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            return Err(DocpackError::EngineMissing(format!(
                "'{} --version' exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        // First line: "pandoc 3.1.9"
        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("unknown")
            .to_string();
        Ok(version)
    }

    /// Convert a DOCX file to one pandoc-supported target format.
    ///
    /// # Errors
    ///
    /// Returns a per-format [`DocpackError::ConversionError`] when pandoc
    /// cannot be run or exits non-zero; stderr is carried in the message.
    pub fn convert_file(
        &self,
        source: &Path,
        format: TargetFormat,
        dest: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(source)
            .args(["-f", "docx", "-t", format.extension()])
            .arg("-o")
            .arg(dest);
        if format == TargetFormat::Html {
            // Fragment output is useless as a sibling artifact; emit a full
            // document with a header.
            cmd.arg("--standalone");
        }

        debug!("running {cmd:?}");
        let output = cmd
            .output()
            .map_err(|e| DocpackError::conversion(format, format!("failed to run pandoc: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocpackError::conversion(
                format,
                format!("pandoc exited with {}: {}", output.status, stderr.trim()),
            ));
        }
        Ok(())
    }
}

/// [`FormatConverter`] entry delegating one format to pandoc.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    engine: PandocEngine,
    format: TargetFormat,
}

impl PandocConverter {
    /// Pair an engine handle with one of its supported formats.
    ///
    /// # Panics
    ///
    /// Panics if `format` is not a pandoc-handled format; the plan is built
    /// from the static format list, so this indicates a programming error.
    #[must_use]
    pub fn new(engine: PandocEngine, format: TargetFormat) -> Self {
        assert!(
            format.uses_pandoc(),
            "{format} is not handled by the pandoc engine"
        );
        Self { engine, format }
    }
}

impl FormatConverter for PandocConverter {
    fn format(&self) -> TargetFormat {
        self.format
    }

    fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        self.engine.convert_file(source, self.format, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_available_missing_binary() {
        let engine = PandocEngine::new("/nonexistent/path/to/pandoc");
        match engine.check_available() {
            Err(DocpackError::EngineMissing(msg)) => {
                assert!(msg.contains("/nonexistent/path/to/pandoc"));
            }
            other => panic!("expected EngineMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_file_missing_binary_is_per_format_error() {
        let engine = PandocEngine::new("/nonexistent/path/to/pandoc");
        let err = engine
            .convert_file(
                Path::new("in.docx"),
                TargetFormat::Html,
                Path::new("out.html"),
            )
            .unwrap_err();
        match err {
            DocpackError::ConversionError { format, .. } => {
                assert_eq!(format, TargetFormat::Html);
            }
            other => panic!("expected ConversionError, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "not handled by the pandoc engine")]
    fn test_pandoc_converter_rejects_pdf() {
        let _ = PandocConverter::new(PandocEngine::from_path(), TargetFormat::Pdf);
    }
}
