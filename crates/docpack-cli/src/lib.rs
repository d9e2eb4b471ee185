//! Command-line interface for the `docpack` DOCX bundling tool
//!
//! `docpack` converts a single DOCX document into sibling formats (HTML,
//! ODT, EPUB, PDF, spaced plain text) and bundles the results into one ZIP
//! archive. HTML/ODT/EPUB are produced by pandoc, the PDF by headless
//! LibreOffice, and the TXT export reads the document structure directly.
//!
//! # Quick Start
//!
//! ```bash
//! # Bundle a document (writes Report_bundle.zip next to the input)
//! docpack bundle Report.docx
//!
//! # Choose the archive location
//! docpack bundle Report.docx -o /tmp/out.zip
//!
//! # Leave the copied source DOCX out of the archive
//! docpack bundle Report.docx --no-source
//!
//! # Skip formats
//! docpack bundle Report.docx --skip epub --skip pdf
//! ```
//!
//! # Commands
//!
//! - `bundle` — the full pipeline: convert and ZIP.
//! - `extract-text` — only the spaced TXT export (stdout by default).
//! - `formats` — list the target formats and their engines.
//! - `check` — report pandoc/LibreOffice availability and versions.
//! - `completions` — generate shell completion scripts.
//!
//! # Configuration
//!
//! Engine locations and defaults come from `.docpack.toml` (current
//! directory) and `~/.docpack.toml`, with CLI flags overriding both:
//!
//! ```toml
//! [engines]
//! pandoc = "/opt/pandoc/bin/pandoc"
//! soffice = "/usr/bin/soffice"
//!
//! [bundle]
//! include_source = true
//! ```
//!
//! # Behavior notes
//!
//! - A missing pandoc is fatal and reported before any work starts. A
//!   missing LibreOffice only disables the PDF entry with a warning.
//! - Each format converts independently; failures are reported per format
//!   and the archive is still written with whatever succeeded.
//! - Intermediate outputs live in a temporary workspace that is removed on
//!   every exit path (`--keep-workspace` preserves it for debugging).

pub mod config;
pub mod paths;
pub mod run;

pub use config::Config;
pub use paths::{ArgsProvider, PathProvider};
pub use run::{run_bundle, run_check, run_extract_text, BundleOptions, Verbosity};
