//! Orchestration for the CLI commands.
//!
//! `run_bundle` is the whole pipeline: resolve the input, preflight the
//! engines, create the workspace, dispatch the conversion plan, resolve the
//! archive destination, write the bundle. The workspace is owned here and
//! dropped on every return path, so cleanup needs no explicit handling.

use crate::paths::PathProvider;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use docpack_convert::{ConversionPlan, PandocEngine, PlanReport, SofficeEngine};
use docpack_core::{bundle, TargetFormat, Workspace};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    #[must_use]
    pub const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if verbose output is requested
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

/// Resolved options for the `bundle` command (flags merged over config).
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Pandoc binary (flag > config > PATH).
    pub pandoc: PathBuf,
    /// LibreOffice binary (flag > config > PATH).
    pub soffice: PathBuf,
    /// Formats to leave out of the plan.
    pub skip: Vec<TargetFormat>,
    /// Bundle the staged source DOCX alongside the conversions.
    pub include_source: bool,
    /// Overwrite an existing archive.
    pub force: bool,
    /// Print the plan without converting.
    pub dry_run: bool,
    /// Preserve the workspace directory for inspection.
    pub keep_workspace: bool,
    /// Emit a JSON summary instead of console text.
    pub json: bool,
    /// Console verbosity.
    pub verbosity: Verbosity,
}

/// Run the full bundle pipeline.
///
/// Non-error early exits (no input selected, input not a DOCX, output
/// selection cancelled) print a message and return `Ok`; by then either no
/// workspace exists yet or it is dropped on return. Fatal errors (missing
/// pandoc, archive write failure) propagate as errors.
///
/// # Errors
///
/// Returns an error when pandoc is unavailable, when the destination exists
/// without `--force`, or when staging/archiving fails.
pub fn run_bundle(provider: &dyn PathProvider, opts: &BundleOptions) -> Result<()> {
    let show = opts.verbosity.should_show_output() && !opts.json;

    // Input selection happens before anything touches the filesystem: a
    // cancelled pick must leave no trace behind.
    let Some(input) = provider.input_path() else {
        if show {
            println!("No input document selected.");
        }
        return Ok(());
    };
    if !input.is_file()
        || !input
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("docx"))
    {
        if show {
            println!("Not an existing .docx file: {}", input.display());
        }
        return Ok(());
    }

    let planned: Vec<TargetFormat> = TargetFormat::ALL
        .into_iter()
        .filter(|f| !opts.skip.contains(f))
        .collect();
    let suggested = input.with_file_name(bundle::suggested_bundle_name(&input));

    if opts.dry_run {
        let names: Vec<String> = planned.iter().map(ToString::to_string).collect();
        println!(
            "Would convert {} to: {}",
            input.display(),
            names.join(", ")
        );
        println!("Would write {}", suggested.display());
        return Ok(());
    }

    // Engine preflight, before any work starts. Pandoc is the primary
    // engine and fatal when missing; LibreOffice only carries the PDF
    // entry, so its absence degrades the plan instead.
    let pandoc = PandocEngine::new(&opts.pandoc);
    let pandoc_version = pandoc.check_available()?;
    if opts.verbosity.is_verbose() && !opts.json {
        println!("Using {pandoc_version}");
    }

    let soffice = if planned.contains(&TargetFormat::Pdf) {
        let engine = SofficeEngine::new(&opts.soffice);
        match engine.check_available() {
            Ok(_) => Some(engine),
            Err(e) => {
                warn!("{e}");
                if show {
                    eprintln!(
                        "{} LibreOffice unavailable, skipping PDF: {e}",
                        "Warning:".yellow().bold()
                    );
                }
                None
            }
        }
    } else {
        None
    };

    let workspace = Workspace::create().context("Failed to create workspace")?;
    let staged = workspace
        .stage_source(&input)
        .context("Failed to copy source into workspace")?;

    let plan = ConversionPlan::standard(pandoc, soffice).skip(&opts.skip);
    let bar = if show {
        let bar = ProgressBar::new(plan.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{bar:30}] {pos}/{len} {msg}")
                .expect("valid progress template")
                .progress_chars("=> "),
        );
        bar
    } else {
        ProgressBar::hidden()
    };
    let report = plan.run_with_progress(&staged, &workspace, |format| {
        bar.set_message(format.to_string());
        bar.inc(1);
    });
    bar.finish_and_clear();

    // The save dialog step: resolving the destination after conversion, so
    // a cancel here still cleans everything up via the workspace drop.
    let Some(output) = provider.output_path(&suggested) else {
        if show {
            println!("No save location selected.");
        }
        return Ok(());
    };
    if output.exists() && !opts.force {
        bail!(
            "Refusing to overwrite existing archive {} (use --force)",
            output.display()
        );
    }

    let skip_names = if opts.include_source {
        Vec::new()
    } else {
        vec![staged
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()]
    };
    let summary = bundle::write_bundle(workspace.path(), &output, &skip_names)
        .with_context(|| format!("Failed to write archive {}", output.display()))?;

    if opts.keep_workspace {
        let kept = workspace.keep();
        if show {
            println!("Workspace kept at {}", kept.display());
        }
    }

    if opts.json {
        print_json_summary(&report, &output, &summary)?;
    } else if opts.verbosity.should_show_output() {
        print_summary(&report, &output, &summary);
    }
    Ok(())
}

fn print_summary(report: &PlanReport, output: &Path, summary: &bundle::BundleSummary) {
    for outcome in &report.outcomes {
        match (&outcome.output, &outcome.error) {
            (Some(name), _) => println!("  {} {name}", "✓".green()),
            (None, Some(error)) => println!("  {} {}: {error}", "✗".red(), outcome.format),
            (None, None) => {}
        }
    }
    let failed = report.failed().len();
    if failed > 0 {
        println!(
            "{} {failed} format(s) failed; the archive contains what succeeded.",
            "Note:".yellow().bold()
        );
    }
    println!(
        "\n{} {} ({} entries, {} bytes)",
        "Bundle:".bold(),
        output.display(),
        summary.entries.len(),
        summary.archive_bytes
    );
}

fn print_json_summary(
    report: &PlanReport,
    output: &Path,
    summary: &bundle::BundleSummary,
) -> Result<()> {
    let value = json!({
        "report": report,
        "archive": {
            "path": output.display().to_string(),
            "entries": summary.entries,
            "bytes": summary.archive_bytes,
        },
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Run the standalone spaced-text export (`extract-text` command).
///
/// # Errors
///
/// Returns an error if the input is not a readable DOCX or the output file
/// cannot be written.
pub fn run_extract_text(input: &Path, output: Option<&Path>) -> Result<()> {
    let paragraphs = docpack_convert::text::extract_paragraphs(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let text = docpack_convert::text::render_spaced(&paragraphs);

    match output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Report engine availability (`check` command).
///
/// # Errors
///
/// Returns an error when pandoc is missing, since no conversion besides the
/// TXT export can work without it.
pub fn run_check(pandoc_path: &Path, soffice_path: &Path) -> Result<()> {
    let pandoc = PandocEngine::new(pandoc_path);
    let pandoc_result = pandoc.check_available();
    match &pandoc_result {
        Ok(version) => println!("{} pandoc: {version}", "✓".green()),
        Err(e) => println!("{} pandoc: {e}", "✗".red()),
    }

    match SofficeEngine::new(soffice_path).check_available() {
        Ok(version) => println!("{} soffice: {version}", "✓".green()),
        Err(e) => println!(
            "{} soffice: {e} (PDF conversion will be skipped)",
            "✗".red()
        ),
    }

    pandoc_result
        .map(|_| ())
        .context("pandoc is required for HTML/ODT/EPUB conversion")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        // Quiet wins when both are set.
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_predicates() {
        assert!(!Verbosity::Quiet.should_show_output());
        assert!(Verbosity::Normal.should_show_output());
        assert!(Verbosity::Verbose.is_verbose());
        assert!(!Verbosity::Normal.is_verbose());
    }
}
