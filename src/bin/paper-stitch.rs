//! Paper Stitch CLI tool
//!
//! Builds a combined PDF of papers with generated title pages and a
//! table-of-contents index, and offers a standalone page-number stamper.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use paper_stitch::pdf::{add_page_numbers, count_pages, PageNumberOptions};
use paper_stitch::pipeline::{stitch, StitchOptions};

/// Paper Stitch - combine papers into one PDF with an index
#[derive(Parser)]
#[command(name = "paper-stitch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Build the combined PDF from a manifest export
    paper-stitch build \"Exported Items.csv\" -o combined_papers.pdf

    # Same, with clickable index entries
    paper-stitch build \"Exported Items.csv\" -o combined_papers.pdf --links

    # Stamp page numbers starting at page 8
    paper-stitch page-numbers combined_papers.pdf -o numbered.pdf --start-page 8")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the combined PDF from a manifest CSV
    Build {
        /// Manifest CSV with Title, File Attachments and Date columns
        manifest: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Add clickable hyperlinks to the index entries
        #[arg(long)]
        links: bool,
    },

    /// Stamp page numbers onto an existing PDF
    PageNumbers {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// First page (1-based) to receive a number
        #[arg(long, default_value_t = 1)]
        start_page: usize,

        /// Font size of the stamped number in points
        #[arg(long, default_value_t = 12.0)]
        font_size: f32,
    },

    /// Show the page count of a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build {
            manifest,
            output,
            links,
        } => cmd_build(manifest, output, links),
        Commands::PageNumbers {
            input,
            output,
            start_page,
            font_size,
        } => cmd_page_numbers(input, output, start_page, font_size),
        Commands::Info { input } => cmd_info(input),
    }
}

fn cmd_build(manifest: PathBuf, output: PathBuf, links: bool) -> anyhow::Result<()> {
    let mut options = StitchOptions::new(manifest, output);
    options.hyperlinks = links;

    let summary = stitch(&options)
        .with_context(|| format!("failed to build {}", options.output.display()))?;

    if links && !summary.hyperlinked {
        eprintln!("Combined PDF created (hyperlinks could not be added): {}", options.output.display());
    } else {
        eprintln!("Combined PDF created: {}", options.output.display());
    }
    eprintln!("Index pages: {}", summary.index_pages);
    eprintln!("Total papers: {}", summary.papers);
    eprintln!("Total pages: {}", summary.total_pages);

    Ok(())
}

fn cmd_page_numbers(
    input: PathBuf,
    output: PathBuf,
    start_page: usize,
    font_size: f32,
) -> anyhow::Result<()> {
    let options = PageNumberOptions {
        start_page,
        font_size,
        ..Default::default()
    };

    add_page_numbers(&input, &output, &options)
        .with_context(|| format!("failed to stamp page numbers onto {}", input.display()))?;

    eprintln!("Output: {}", output.display());
    Ok(())
}

fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    let pages = count_pages(&input)
        .with_context(|| format!("failed to inspect {}", input.display()))?;

    println!("File: {}", input.display());
    println!("Pages: {pages}");
    Ok(())
}
