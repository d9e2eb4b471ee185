//! Error types for bundling operations.
//!
//! The taxonomy mirrors how failures are handled: [`DocpackError::EngineMissing`]
//! is fatal and raised before any work starts, [`DocpackError::ConversionError`]
//! is recoverable and recorded per format by the dispatcher, and the remaining
//! variants wrap I/O and container-parsing failures.

use crate::format::TargetFormat;
use thiserror::Error;

/// Error type covering every failure mode of a bundling run.
#[derive(Error, Debug)]
pub enum DocpackError {
    /// An external conversion engine binary is absent or not runnable.
    ///
    /// Raised by the availability probes before any conversion is attempted.
    /// For the primary engine this terminates the run; no workspace is
    /// created and nothing is written.
    #[error("engine not available: {0}")]
    EngineMissing(String),

    /// A single target format failed to convert.
    ///
    /// The dispatcher catches this per format, logs it, and continues with
    /// the remaining formats. Partial success is a normal terminal outcome.
    #[error("conversion to {format} failed: {message}")]
    ConversionError {
        /// The format whose conversion failed.
        format: TargetFormat,
        /// Engine output or a description of what went wrong.
        message: String,
    },

    /// File I/O error (read, write, copy, directory enumeration).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// ZIP container error, from reading a DOCX or writing the bundle.
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// XML parse error from the DOCX document body.
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// The input is not a usable DOCX document.
    #[error("format error: {0}")]
    FormatError(String),
}

impl DocpackError {
    /// Construct a per-format conversion error.
    #[inline]
    #[must_use]
    pub fn conversion(format: TargetFormat, message: impl Into<String>) -> Self {
        Self::ConversionError {
            format,
            message: message.into(),
        }
    }
}

/// Type alias for [`Result<T, DocpackError>`].
pub type Result<T> = std::result::Result<T, DocpackError>;
