//! Library-level tests for the bundle orchestration.
//!
//! These exercise the paths a CLI invocation cannot reach (cancelled output
//! selection, per-format failure) using a stub pandoc script, so they are
//! hermetic and Unix-only.
#![cfg(unix)]

use docpack_cli::{run_bundle, BundleOptions, PathProvider, Verbosity};
use docpack_core::TargetFormat;
use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Build a minimal DOCX container with the given paragraphs.
fn make_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(b"<?xml version=\"1.0\"?><Types/>").unwrap();

    let mut body = String::new();
    for text in paragraphs {
        body.push_str(&format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"));
    }
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

/// Install a pandoc stand-in: answers --version, writes a marker file to the
/// -o argument, and fails for the formats listed in `fail_formats`.
fn stub_pandoc(dir: &Path, fail_formats: &[&str]) -> PathBuf {
    let path = dir.join("pandoc-stub");
    let fail_case = if fail_formats.is_empty() {
        String::new()
    } else {
        // e.g. `odt|epub) echo "stub refuses $fmt" >&2; exit 1 ;;`
        format!(
            "case \"$fmt\" in {}) echo \"stub refuses $fmt\" >&2; exit 1 ;; esac\n",
            fail_formats.join("|")
        )
    };
    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then echo \"pandoc 3.1.9-stub\"; exit 0; fi\n\
         out=\"\"; fmt=\"\"; prev=\"\"\n\
         for a in \"$@\"; do\n\
           [ \"$prev\" = \"-o\" ] && out=\"$a\"\n\
           [ \"$prev\" = \"-t\" ] && fmt=\"$a\"\n\
           prev=\"$a\"\n\
         done\n\
         {fail_case}\
         printf 'stub %s output' \"$fmt\" > \"$out\"\n"
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn options(pandoc: PathBuf) -> BundleOptions {
    BundleOptions {
        pandoc,
        soffice: PathBuf::from("/nonexistent/soffice"),
        skip: vec![TargetFormat::Pdf],
        include_source: true,
        force: false,
        dry_run: false,
        keep_workspace: false,
        json: false,
        verbosity: Verbosity::Quiet,
    }
}

struct Provider {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    cancel_output: bool,
}

impl PathProvider for Provider {
    fn input_path(&self) -> Option<PathBuf> {
        self.input.clone()
    }

    fn output_path(&self, suggested: &Path) -> Option<PathBuf> {
        if self.cancel_output {
            None
        } else {
            Some(self.output.clone().unwrap_or_else(|| suggested.to_path_buf()))
        }
    }
}

fn entry_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_full_flow_with_stub_engine() {
    let dir = TempDir::new().unwrap();
    let docx = make_docx(dir.path(), "Report.docx", &["First.", "Second."]);
    let pandoc = stub_pandoc(dir.path(), &[]);

    let provider = Provider {
        input: Some(docx),
        output: None,
        cancel_output: false,
    };
    run_bundle(&provider, &options(pandoc)).unwrap();

    let archive = dir.path().join("Report_bundle.zip");
    assert!(archive.exists());
    assert_eq!(
        entry_names(&archive),
        [
            "Report.docx",
            "Report.epub",
            "Report.html",
            "Report.odt",
            "Report.txt",
        ]
    );
}

#[test]
fn test_cancelled_output_selection_leaves_nothing() {
    let dir = TempDir::new().unwrap();
    let docx = make_docx(dir.path(), "Report.docx", &["Hello."]);
    let pandoc = stub_pandoc(dir.path(), &[]);

    let provider = Provider {
        input: Some(docx.clone()),
        output: None,
        cancel_output: true,
    };
    run_bundle(&provider, &options(pandoc)).unwrap();

    // Conversions ran, but cancelling the save leaves only the untouched
    // source behind: no archive, and the workspace was dropped.
    assert!(!dir.path().join("Report_bundle.zip").exists());
    assert!(docx.exists());
}

#[test]
fn test_single_format_failure_still_produces_archive() {
    let dir = TempDir::new().unwrap();
    let docx = make_docx(dir.path(), "Report.docx", &["Hello."]);
    let pandoc = stub_pandoc(dir.path(), &["odt"]);

    let provider = Provider {
        input: Some(docx),
        output: None,
        cancel_output: false,
    };
    run_bundle(&provider, &options(pandoc)).unwrap();

    let names = entry_names(&dir.path().join("Report_bundle.zip"));
    assert!(names.contains(&"Report.html".to_string()));
    assert!(names.contains(&"Report.txt".to_string()));
    assert!(!names.contains(&"Report.odt".to_string()));
}

#[test]
fn test_exclude_source_from_archive() {
    let dir = TempDir::new().unwrap();
    let docx = make_docx(dir.path(), "Report.docx", &["Hello."]);
    let pandoc = stub_pandoc(dir.path(), &[]);

    let provider = Provider {
        input: Some(docx),
        output: None,
        cancel_output: false,
    };
    let mut opts = options(pandoc);
    opts.include_source = false;
    run_bundle(&provider, &opts).unwrap();

    let names = entry_names(&dir.path().join("Report_bundle.zip"));
    assert!(!names.contains(&"Report.docx".to_string()));
    assert!(names.contains(&"Report.txt".to_string()));
}

#[test]
fn test_existing_archive_requires_force() {
    let dir = TempDir::new().unwrap();
    let docx = make_docx(dir.path(), "Report.docx", &["Hello."]);
    let pandoc = stub_pandoc(dir.path(), &[]);
    let archive = dir.path().join("Report_bundle.zip");
    fs::write(&archive, b"previous archive").unwrap();

    let provider = Provider {
        input: Some(docx),
        output: None,
        cancel_output: false,
    };
    let err = run_bundle(&provider, &options(pandoc.clone())).unwrap_err();
    assert!(err.to_string().contains("--force"));
    assert_eq!(fs::read(&archive).unwrap(), b"previous archive");

    let provider = Provider {
        input: Some(make_docx(dir.path(), "Report.docx", &["Hello."])),
        output: None,
        cancel_output: false,
    };
    let mut opts = options(pandoc);
    opts.force = true;
    run_bundle(&provider, &opts).unwrap();
    assert!(entry_names(&archive).contains(&"Report.txt".to_string()));
}
