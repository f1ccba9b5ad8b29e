//! 3MF package analyzer command-line interface
//!
//! Lists the plates of a Bambu Studio / OrcaSlicer project and the objects
//! placed on each, grouped by name, as text, CSV or JSON.

#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use threemf_analyzer::format::{write_csv, write_text};
use threemf_analyzer::{
    ParseOptions, ParsedPackage, PlateFallback, PlateOrder, parse_package_with_options,
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "3mf-analyzer", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List plates and objects of a 3MF file
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Path to the 3MF file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Order plates by ID instead of declaration order
    #[arg(long)]
    sort_plates: bool,

    /// Plate receiving objects without a plate assignment
    #[arg(long, value_enum, default_value_t = FallbackArg::First)]
    plate_fallback: FallbackArg,

    /// Report objects on a synthetic "Plate 1" when the file declares no plates
    #[arg(long)]
    default_plate: bool,

    /// Skip reading filament assignments
    #[arg(long)]
    no_materials: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FallbackArg {
    /// First declared plate
    First,
    /// Plate with the lowest ID
    Lowest,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("File must have .3mf extension: {0}")]
    InvalidExtension(String),

    #[error("File does not exist: {0}")]
    NotFound(String),

    #[error("Failed to parse 3MF file: {0}")]
    Parse(#[from] threemf_analyzer::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("Failed to format output as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ListArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_plate_fallback(match self.plate_fallback {
                FallbackArg::First => PlateFallback::FirstDeclared,
                FallbackArg::Lowest => PlateFallback::LowestId,
            })
            .with_plate_order(if self.sort_plates {
                PlateOrder::ById
            } else {
                PlateOrder::Declared
            })
            .with_default_plate(self.default_plate)
            .with_materials(!self.no_materials)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::List(args) => run_list(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_list(args: &ListArgs) -> Result<(), CliError> {
    check_input(&args.file)?;

    let package = parse_package_with_options(&args.file, &args.options())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&package, args.format, &mut out)?;
    out.flush()?;
    Ok(())
}

fn check_input(path: &Path) -> Result<(), CliError> {
    let is_3mf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("3mf"));
    if !is_3mf {
        return Err(CliError::InvalidExtension(path.display().to_string()));
    }
    if !path.exists() {
        return Err(CliError::NotFound(path.display().to_string()));
    }
    Ok(())
}

fn render<W: Write>(
    package: &ParsedPackage,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => write_text(package, out)?,
        OutputFormat::Csv => write_csv(package, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, package)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
