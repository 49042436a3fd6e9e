//! pdf-outline CLI - PDF title and heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::analysis::DEFAULT_PAGE_LIMIT;
use pdf_outline::render::{to_json, JsonFormat};
use pdf_outline::{
    BatchProcessor, ErrorMode, HeadingLevel, OutlineExtractor, OutlineOptions, PageSelection,
    ScoreThresholds,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Extract a title and H1/H2/H3 outline from PDF files", long_about = None)]
struct Cli {
    /// Directory of PDF files to process
    #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT", default_value = "input")]
    input: PathBuf,

    /// Directory for the JSON outlines
    #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT", default_value = "output")]
    output: PathBuf,

    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command.
#[derive(Args)]
struct Tuning {
    /// Minimum score for a line to count as a heading
    #[arg(long, global = true, default_value_t = ScoreThresholds::default().candidate_min)]
    min_score: u32,

    /// Scores above this are H1
    #[arg(long, global = true, default_value_t = ScoreThresholds::default().h1_above)]
    h1_above: u32,

    /// Scores above this (and not H1) are H2
    #[arg(long, global = true, default_value_t = ScoreThresholds::default().h2_above)]
    h2_above: u32,

    /// Keep going when a page cannot be decoded
    #[arg(long, global = true)]
    lenient: bool,
}

impl Tuning {
    fn options(&self) -> OutlineOptions {
        let mode = if self.lenient {
            ErrorMode::Lenient
        } else {
            ErrorMode::Strict
        };
        OutlineOptions::new()
            .with_error_mode(mode)
            .with_thresholds(ScoreThresholds {
                candidate_min: self.min_score,
                h1_above: self.h1_above,
                h2_above: self.h2_above,
            })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write one JSON outline per PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process files in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Extract the outline of a single PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Print per-line scores for threshold calibration
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of leading pages to inspect
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
        pages: usize,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.tuning.options();
    log::debug!("Options: {:?}", options);

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            parallel,
        }) => cmd_batch(&input, &output, options, parallel),
        Some(Commands::Extract {
            input,
            output,
            compact,
            pages,
        }) => cmd_extract(&input, output.as_deref(), compact, pages.as_deref(), options),
        Some(Commands::Inspect { input, pages }) => cmd_inspect(&input, pages, options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, options, false),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: OutlineOptions,
    parallel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let processor = BatchProcessor::new(options).with_parallel(parallel);
    let files = processor.pdf_files(input)?;
    if files.is_empty() {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let progress = pb.clone();
    let report = processor
        .on_progress(move |path| {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            progress.set_message(name.into_owned());
            progress.inc(1);
        })
        .run_files(&files, output)?;
    pb.finish_and_clear();

    println!(
        "{} {} of {} files in {:.2}s",
        "Processed".green().bold(),
        report.processed.len(),
        report.total(),
        start.elapsed().as_secs_f64()
    );
    for (path, reason) in &report.failed {
        println!("  {} {}: {}", "✗".red(), path.display(), reason);
    }
    println!("{} {}", "Output:".dimmed(), output.display());

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pages: Option<&str>,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p)?
    } else {
        PageSelection::All
    };

    let extractor = OutlineExtractor::new(options.with_pages(page_selection));
    let outline = extractor.extract_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
        println!(
            "  {} {}  {} {}  {} {}",
            "H1".bold(),
            outline.count_level(HeadingLevel::H1),
            "H2".bold(),
            outline.count_level(HeadingLevel::H2),
            "H3".bold(),
            outline.count_level(HeadingLevel::H3),
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_inspect(
    input: &Path,
    page_limit: usize,
    options: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    // The profile covers the whole document, only the rows are limited.
    let report = OutlineExtractor::new(options).inspect_file(input, page_limit)?;
    report.write_to(std::io::stdout().lock())?;
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}
