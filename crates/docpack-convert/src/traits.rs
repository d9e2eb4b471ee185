//! Core trait definition for format converters.

use docpack_core::{Result, TargetFormat};
use std::path::Path;

/// A single (format tag, output strategy) pair in the conversion plan.
///
/// Implementations produce exactly one output file at `dest` from the staged
/// source document, or return an error. They never touch files outside the
/// destination and never mutate the source.
pub trait FormatConverter {
    /// The format this converter produces.
    fn format(&self) -> TargetFormat;

    /// Convert `source` (a DOCX file) into `dest`.
    ///
    /// # Errors
    ///
    /// Returns [`docpack_core::DocpackError::ConversionError`] when the
    /// conversion fails; the dispatcher records it and continues with the
    /// remaining formats.
    fn convert(&self, source: &Path, dest: &Path) -> Result<()>;
}
