//! Target output formats for a bundling run.
//!
//! The format set is fixed at compile time: four converted formats plus the
//! structural plain-text export. [`TargetFormat::ALL`] defines the order in
//! which the dispatcher attempts them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A target output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetFormat {
    /// Standalone HTML document (pandoc)
    #[serde(rename = "HTML")]
    Html,
    /// OpenDocument Text (pandoc)
    #[serde(rename = "ODT")]
    Odt,
    /// EPUB e-book (pandoc)
    #[serde(rename = "EPUB")]
    Epub,
    /// PDF with original visual styling (LibreOffice)
    #[serde(rename = "PDF")]
    Pdf,
    /// Plain text with paragraph spacing (structural export, no engine)
    #[serde(rename = "TXT")]
    Txt,
}

impl TargetFormat {
    /// All target formats, in dispatch order.
    pub const ALL: [Self; 5] = [Self::Html, Self::Odt, Self::Epub, Self::Pdf, Self::Txt];

    /// File extension for this format (without the dot).
    #[inline]
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Odt => "odt",
            Self::Epub => "epub",
            Self::Pdf => "pdf",
            Self::Txt => "txt",
        }
    }

    /// Output file name for a document base name, e.g. `Report` → `Report.html`.
    #[inline]
    #[must_use]
    pub fn output_name(self, base: &str) -> String {
        format!("{base}.{}", self.extension())
    }

    /// Whether this format is produced by the general conversion engine.
    ///
    /// PDF uses a separate rendering integration and TXT is a structural
    /// export with no external dependency.
    #[inline]
    #[must_use]
    pub const fn uses_pandoc(self) -> bool {
        matches!(self, Self::Html | Self::Odt | Self::Epub)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TargetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "odt" => Ok(Self::Odt),
            "epub" => Ok(Self::Epub),
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Txt),
            other => Err(format!(
                "unknown format '{other}' (expected one of: html, odt, epub, pdf, txt)"
            )),
        }
    }
}
