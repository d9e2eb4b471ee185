//! Structural plain-text export.
//!
//! The TXT artifact is not a conversion: the DOCX container is opened as a
//! ZIP archive and `word/document.xml` is parsed directly (docx-rs is
//! writer-only, so DOCX reading is manual ZIP + XML). Paragraph text is
//! collected in document order and written with one blank line between
//! non-empty paragraphs. Styling, tables, images and headers are not
//! represented.

use crate::traits::FormatConverter;
use docpack_core::{DocpackError, Result, TargetFormat};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Read the paragraph sequence of a DOCX file, in document order.
///
/// Each returned string is the concatenated text of one `w:p` element:
/// `w:t` runs joined as-is, `w:tab` as a tab, `w:br`/`w:cr` as an embedded
/// newline. No trimming is applied here; callers decide what an empty
/// paragraph means.
///
/// # Errors
///
/// Returns [`DocpackError::FormatError`] if the file is not a ZIP container
/// or has no `word/document.xml`, and an XML error if the body is malformed.
pub fn extract_paragraphs(source: &Path) -> Result<Vec<String>> {
    let file = File::open(source)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| DocpackError::FormatError(format!("not a DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| DocpackError::FormatError("missing word/document.xml".to_string()))?
        .read_to_string(&mut xml)?;

    parse_paragraphs(&xml)
}

/// Parse paragraph text out of a `word/document.xml` body.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_run = false;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            // w:tab inside w:pPr/w:tabs is a tab-stop definition, not content,
            // so breaks and tabs only count inside a run.
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_run => current.push('\t'),
                b"w:br" | b"w:cr" if in_run => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                current.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => in_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// Render paragraphs as spaced plain text.
///
/// Each paragraph is trimmed; paragraphs empty after trimming are skipped
/// entirely (no blank line emitted for them). Every surviving paragraph is
/// followed by exactly two newlines, so consecutive paragraphs are separated
/// by exactly one blank line.
#[must_use]
pub fn render_spaced(paragraphs: &[String]) -> String {
    let mut out = String::new();
    for paragraph in paragraphs {
        let text = paragraph.trim();
        if text.is_empty() {
            continue;
        }
        out.push_str(text);
        out.push_str("\n\n");
    }
    out
}

/// [`FormatConverter`] entry for the spaced TXT export.
///
/// Output is UTF-8, so arbitrary document content survives.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl FormatConverter for TextExporter {
    fn format(&self) -> TargetFormat {
        TargetFormat::Txt
    }

    fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let paragraphs = extract_paragraphs(source)?;
        fs::write(dest, render_spaced(&paragraphs))?;
        Ok(())
    }
}
