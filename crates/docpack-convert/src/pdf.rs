//! LibreOffice PDF rendering adapter.
//!
//! PDF takes a separate code path from the general conversion engine:
//! headless LibreOffice re-renders the DOCX with its original visual
//! styling, which pandoc-class converters do not preserve.
//!
//! LibreOffice picks the output file name itself (`{base}.pdf` inside
//! `--outdir`) and is known to exit 0 on some failed conversions, so the
//! adapter verifies the expected file exists afterwards.

use crate::traits::FormatConverter;
use docpack_core::{DocpackError, Result, TargetFormat};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Handle to a LibreOffice (`soffice`) installation.
#[derive(Debug, Clone)]
pub struct SofficeEngine {
    binary: PathBuf,
}

impl SofficeEngine {
    /// Create an engine handle for an explicit binary path.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Engine handle resolving `soffice` from PATH.
    #[must_use]
    pub fn from_path() -> Self {
        Self::new("soffice")
    }

    /// The configured binary path.
    #[inline]
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Check that LibreOffice is runnable and return its version line.
    ///
    /// # Errors
    ///
    /// Returns [`DocpackError::EngineMissing`] if the binary cannot be
    /// spawned or exits non-zero. Unlike pandoc this is not fatal for the
    /// run; the caller drops the PDF plan entry instead.
    pub fn check_available(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|_| {
                DocpackError::EngineMissing(format!(
                    "soffice not found at '{}'",
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

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("unknown")
            .to_string();
        Ok(version)
    }
}

/// [`FormatConverter`] entry rendering the PDF via LibreOffice.
#[derive(Debug, Clone)]
pub struct PdfConverter {
    engine: SofficeEngine,
}

impl PdfConverter {
    /// Wrap an engine handle.
    #[must_use]
    pub fn new(engine: SofficeEngine) -> Self {
        Self { engine }
    }
}

impl FormatConverter for PdfConverter {
    fn format(&self) -> TargetFormat {
        TargetFormat::Pdf
    }

    fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let format = TargetFormat::Pdf;
        let outdir = dest.parent().unwrap_or_else(|| Path::new("."));

        let mut cmd = Command::new(self.engine.binary());
        cmd.args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(outdir)
            .arg(source);

        debug!("running {cmd:?}");
        let output = cmd.output().map_err(|e| {
            DocpackError::conversion(format, format!("failed to run soffice: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocpackError::conversion(
                format,
                format!("soffice exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        // soffice exits 0 on some failures (e.g. filter errors); trust the
        // filesystem, not the exit code.
        if !dest.is_file() {
            return Err(DocpackError::conversion(
                format,
                format!(
                    "soffice reported success but produced no file at {}",
                    dest.display()
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_available_missing_binary() {
        let engine = SofficeEngine::new("/nonexistent/path/to/soffice");
        match engine.check_available() {
            Err(DocpackError::EngineMissing(msg)) => {
                assert!(msg.contains("soffice"));
            }
            other => panic!("expected EngineMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_missing_binary_is_per_format_error() {
        let converter = PdfConverter::new(SofficeEngine::new("/nonexistent/path/to/soffice"));
        let err = converter
            .convert(Path::new("in.docx"), Path::new("/tmp/out.pdf"))
            .unwrap_err();
        match err {
            DocpackError::ConversionError { format, .. } => {
                assert_eq!(format, TargetFormat::Pdf);
            }
            other => panic!("expected ConversionError, got {other:?}"),
        }
    }
}
