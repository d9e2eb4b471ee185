//! Input/output path capabilities.
//!
//! The two user interactions of the tool ("which document?", "where should
//! the archive go?") are abstract capabilities so the orchestration never
//! knows whether it is driven by CLI arguments or some interactive front
//! end. Returning `None` from either is the cancel path: the run ends
//! cleanly without producing anything (and with the workspace removed, if
//! one was created).

use std::path::{Path, PathBuf};

/// Source of the input document path and the archive destination path.
pub trait PathProvider {
    /// The document to bundle, or `None` if nothing was selected.
    fn input_path(&self) -> Option<PathBuf>;

    /// Where to write the archive, given a suggested default
    /// (`{base}_bundle.zip` beside the input). `None` cancels the run.
    fn output_path(&self, suggested: &Path) -> Option<PathBuf>;
}

/// [`PathProvider`] backed by command-line arguments.
///
/// An absent output argument accepts the suggested default, which matches
/// how a save dialog pre-fills its file name field.
#[derive(Debug, Clone, Default)]
pub struct ArgsProvider {
    /// Positional input argument, if given.
    pub input: Option<PathBuf>,
    /// `-o/--output` argument, if given.
    pub output: Option<PathBuf>,
}

impl PathProvider for ArgsProvider {
    fn input_path(&self) -> Option<PathBuf> {
        self.input.clone()
    }

    fn output_path(&self, suggested: &Path) -> Option<PathBuf> {
        Some(
            self.output
                .clone()
                .unwrap_or_else(|| suggested.to_path_buf()),
        )
    }
}
