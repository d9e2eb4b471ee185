//! # Docpack Core
//!
//! Shared types for the `docpack` DOCX bundling tool: the error taxonomy,
//! the fixed set of target formats, the temporary workspace that holds
//! intermediate conversion outputs, and the ZIP bundle writer.
//!
//! A bundling run owns exactly one [`Workspace`]. Converters (in
//! `docpack-convert`) write their outputs into it, and [`bundle::write_bundle`]
//! snapshots whatever the workspace contains into a flat ZIP archive. The
//! workspace is removed when it is dropped, on every exit path.
//!
//! ```rust,no_run
//! use docpack_core::{bundle, Workspace};
//! use std::path::Path;
//!
//! # fn main() -> docpack_core::Result<()> {
//! let workspace = Workspace::create()?;
//! workspace.stage_source(Path::new("Report.docx"))?;
//! // ... converters write Report.html, Report.txt, ... into the workspace
//! let summary = bundle::write_bundle(workspace.path(), Path::new("Report_bundle.zip"), &[])?;
//! println!("{} entries", summary.entries.len());
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod error;
pub mod format;
pub mod workspace;

pub use bundle::{suggested_bundle_name, write_bundle, BundleSummary};
pub use error::{DocpackError, Result};
pub use format::TargetFormat;
pub use workspace::Workspace;
