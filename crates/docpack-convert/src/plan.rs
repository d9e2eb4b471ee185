//! The conversion plan: a fixed ordered list of converters and the
//! sequential dispatch loop that runs them.
//!
//! Every entry is attempted independently. A failing format is logged and
//! recorded in the [`PlanReport`]; it never stops the remaining formats.
//! There are no retries, and partial success is a normal terminal outcome
//! (the bundle simply contains fewer entries).

use crate::pandoc::{PandocConverter, PandocEngine};
use crate::pdf::{PdfConverter, SofficeEngine};
use crate::text::TextExporter;
use crate::traits::FormatConverter;
use docpack_core::{TargetFormat, Workspace};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

/// Outcome of one plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOutcome {
    /// The attempted format.
    pub format: TargetFormat,
    /// Output file name inside the workspace (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Failure description (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormatOutcome {
    /// Whether this entry produced its output file.
    #[inline]
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-format outcomes of a full plan run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    /// One outcome per attempted entry, in dispatch order.
    pub outcomes: Vec<FormatOutcome>,
}

impl PlanReport {
    /// Formats that produced their output.
    #[must_use]
    pub fn succeeded(&self) -> Vec<TargetFormat> {
        self.outcomes
            .iter()
            .filter(|o| o.succeeded())
            .map(|o| o.format)
            .collect()
    }

    /// Formats that failed.
    #[must_use]
    pub fn failed(&self) -> Vec<TargetFormat> {
        self.outcomes
            .iter()
            .filter(|o| !o.succeeded())
            .map(|o| o.format)
            .collect()
    }
}

/// An ordered list of format converters for one source document.
pub struct ConversionPlan {
    converters: Vec<Box<dyn FormatConverter>>,
}

impl ConversionPlan {
    /// The standard five-entry plan: HTML, ODT, EPUB via pandoc, PDF via
    /// LibreOffice, then the structural TXT export.
    ///
    /// `soffice` is optional: without it the PDF entry is omitted, which is
    /// how a missing LibreOffice installation degrades the run instead of
    /// failing it.
    #[must_use]
    pub fn standard(pandoc: PandocEngine, soffice: Option<SofficeEngine>) -> Self {
        let mut converters: Vec<Box<dyn FormatConverter>> = vec![
            Box::new(PandocConverter::new(pandoc.clone(), TargetFormat::Html)),
            Box::new(PandocConverter::new(pandoc.clone(), TargetFormat::Odt)),
            Box::new(PandocConverter::new(pandoc, TargetFormat::Epub)),
        ];
        if let Some(engine) = soffice {
            converters.push(Box::new(PdfConverter::new(engine)));
        }
        converters.push(Box::new(TextExporter));
        Self { converters }
    }

    /// Build a plan from explicit converters (used by tests and embedders).
    #[must_use]
    pub fn from_converters(converters: Vec<Box<dyn FormatConverter>>) -> Self {
        Self { converters }
    }

    /// Drop the given formats from the plan.
    #[must_use]
    pub fn skip(mut self, formats: &[TargetFormat]) -> Self {
        self.converters
            .retain(|c| !formats.contains(&c.format()));
        self
    }

    /// Formats this plan will attempt, in order.
    #[must_use]
    pub fn formats(&self) -> Vec<TargetFormat> {
        self.converters.iter().map(|c| c.format()).collect()
    }

    /// Number of plan entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Whether the plan has no entries left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Run every entry sequentially against `source`, writing outputs into
    /// the workspace.
    #[must_use = "the report carries per-format failures the caller should surface"]
    pub fn run(&self, source: &Path, workspace: &Workspace) -> PlanReport {
        self.run_with_progress(source, workspace, |_| {})
    }

    /// Like [`ConversionPlan::run`], invoking `on_entry` with each format
    /// just before it is attempted (progress reporting hook).
    pub fn run_with_progress(
        &self,
        source: &Path,
        workspace: &Workspace,
        mut on_entry: impl FnMut(TargetFormat),
    ) -> PlanReport {
        let base = source
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mut report = PlanReport::default();
        for converter in &self.converters {
            let format = converter.format();
            on_entry(format);

            let name = format.output_name(&base);
            let dest = workspace.target_path(&name);
            match converter.convert(source, &dest) {
                Ok(()) => {
                    info!("converted to {format}");
                    report.outcomes.push(FormatOutcome {
                        format,
                        output: Some(name),
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("conversion to {format} failed: {e}");
                    report.outcomes.push(FormatOutcome {
                        format,
                        output: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        report
    }
}
