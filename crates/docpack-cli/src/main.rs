//! docpack - DOCX conversion and bundling tool
//!
//! Converts one DOCX document into sibling formats and ZIPs the results.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use docpack_cli::{
    run_bundle, run_check, run_extract_text, ArgsProvider, BundleOptions, Config, Verbosity,
};
use docpack_core::TargetFormat;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docpack",
    version,
    about = "Convert a DOCX document to HTML, ODT, EPUB, PDF and spaced TXT, bundled as a ZIP"
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DOCX document and bundle the results into a ZIP archive
    Bundle {
        /// Input DOCX file
        input: Option<PathBuf>,

        /// Archive destination (default: {base}_bundle.zip beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip a target format (repeatable)
        #[arg(long, value_name = "FORMAT", value_parser = parse_target_format)]
        skip: Vec<TargetFormat>,

        /// Leave the copied source DOCX out of the archive
        #[arg(long)]
        no_source: bool,

        /// Overwrite an existing archive
        #[arg(long)]
        force: bool,

        /// Show what would happen without converting
        #[arg(long)]
        dry_run: bool,

        /// Preserve the temporary workspace for inspection
        #[arg(long)]
        keep_workspace: bool,

        /// Emit a JSON summary instead of console text
        #[arg(long)]
        json: bool,

        /// Pandoc binary to use (overrides config)
        #[arg(long, value_name = "PATH")]
        pandoc: Option<PathBuf>,

        /// LibreOffice binary to use (overrides config)
        #[arg(long, value_name = "PATH")]
        soffice: Option<PathBuf>,
    },

    /// Export only the spaced plain-text rendition of a DOCX document
    ExtractText {
        /// Input DOCX file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the target formats and the engine each one uses
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the external conversion engines are available
    Check {
        /// Pandoc binary to check (overrides config)
        #[arg(long, value_name = "PATH")]
        pandoc: Option<PathBuf>,

        /// LibreOffice binary to check (overrides config)
        #[arg(long, value_name = "PATH")]
        soffice: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn parse_target_format(s: &str) -> Result<TargetFormat, String> {
    s.parse()
}

/// Engine a format is delegated to, for the formats listing.
const fn engine_name(format: TargetFormat) -> &'static str {
    match format {
        TargetFormat::Html | TargetFormat::Odt | TargetFormat::Epub => "pandoc",
        TargetFormat::Pdf => "libreoffice",
        TargetFormat::Txt => "built-in",
    }
}

fn print_formats(json: bool) -> Result<()> {
    if json {
        let list: Vec<_> = TargetFormat::ALL
            .into_iter()
            .map(|f| {
                serde_json::json!({
                    "format": f,
                    "extension": f.extension(),
                    "engine": engine_name(f),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        println!("{}", "Target formats:".bold());
        for format in TargetFormat::ALL {
            println!("  .{:<5} via {}", format.extension(), engine_name(format));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::discover();
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    match args.command {
        Commands::Bundle {
            input,
            output,
            skip,
            no_source,
            force,
            dry_run,
            keep_workspace,
            json,
            pandoc,
            soffice,
        } => {
            let provider = ArgsProvider { input, output };
            let opts = BundleOptions {
                pandoc: pandoc.unwrap_or_else(|| config.pandoc_binary()),
                soffice: soffice.unwrap_or_else(|| config.soffice_binary()),
                skip,
                include_source: !no_source && config.include_source(),
                force,
                dry_run,
                keep_workspace,
                json,
                verbosity,
            };
            run_bundle(&provider, &opts)
        }
        Commands::ExtractText { input, output } => run_extract_text(&input, output.as_deref()),
        Commands::Formats { json } => print_formats(json),
        Commands::Check { pandoc, soffice } => run_check(
            &pandoc.unwrap_or_else(|| config.pandoc_binary()),
            &soffice.unwrap_or_else(|| config.soffice_binary()),
        ),
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
