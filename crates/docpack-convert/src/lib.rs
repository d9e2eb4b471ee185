//! # Docpack Convert
//!
//! Format converters for the `docpack` bundling tool and the plan that
//! dispatches them.
//!
//! Three conversion paths exist, matching what each format needs:
//!
//! - **HTML, ODT, EPUB** go through the general conversion engine
//!   ([`PandocEngine`], an external `pandoc` binary).
//! - **PDF** goes through a visual-fidelity rendering integration
//!   ([`SofficeEngine`], headless LibreOffice), because general document
//!   converters render DOCX→PDF poorly.
//! - **TXT** is a structural export ([`text`]): the DOCX container is read
//!   directly and paragraph text is written with blank-line spacing. No
//!   external engine is involved.
//!
//! [`ConversionPlan`] holds the fixed ordered list of converters and runs
//! them strictly sequentially, recording per-format outcomes instead of
//! aborting on the first failure.

pub mod pandoc;
pub mod pdf;
pub mod plan;
pub mod text;
pub mod traits;

pub use pandoc::{PandocConverter, PandocEngine};
pub use pdf::{PdfConverter, SofficeEngine};
pub use plan::{ConversionPlan, FormatOutcome, PlanReport};
pub use text::TextExporter;
pub use traits::FormatConverter;
