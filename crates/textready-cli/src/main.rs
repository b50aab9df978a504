//! Textready CLI - wrap over-long spreadsheet column text across cells

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use textready::prelude::*;
use textready::inspect;

#[derive(Parser)]
#[command(name = "textready")]
#[command(
    author,
    version,
    about = "Split over-long cells in a spreadsheet column at word boundaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a column's over-long cells into adjacent cells
    Split {
        /// Input workbook (.xlsx)
        input: PathBuf,

        /// Column holding the text (e.g. "B")
        column: String,

        /// Maximum characters per cell
        max_chars: usize,

        /// Directory for the output workbook (default: next to the input)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Accept a character limit outside the recommended 18-23 window
        #[arg(long)]
        no_bounds: bool,
    },

    /// Validate a workbook and suggest split parameters
    Check {
        /// Input workbook (.xlsx)
        input: PathBuf,
    },

    /// Show information about a workbook
    Info {
        /// Input workbook (.xlsx)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            input,
            column,
            max_chars,
            out_dir,
            no_bounds,
        } => split(&input, &column, max_chars, out_dir.as_deref(), no_bounds),
        Commands::Check { input } => check(&input),
        Commands::Info { input } => show_info(&input),
    }
}

fn split(
    input: &Path,
    column: &str,
    max_chars: usize,
    out_dir: Option<&Path>,
    no_bounds: bool,
) -> Result<()> {
    let config = SplitConfig::new(column.trim().to_uppercase(), max_chars);

    if !no_bounds {
        config.check_bounds(&LimitBounds::default())?;
    }

    let outcome = textready::process_into(input, out_dir, &config)
        .with_context(|| format!("Failed to process '{}'", input.display()))?;

    println!("{}", outcome.message);
    println!("Output: {}", outcome.output.display());
    Ok(())
}

fn check(input: &Path) -> Result<()> {
    let bounds = LimitBounds::default();
    let report = inspect(input, &bounds)
        .with_context(|| format!("Failed to inspect '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Sheet: \"{}\"", report.sheet_name);
    println!(
        "Used range: {} rows x {} columns",
        report.total_rows, report.total_columns
    );

    for col in &report.columns {
        println!();
        println!("  Column {}", col.letter);
        println!("    Sample: {}", col.sample);
        println!(
            "    Text length: avg {:.0}, max {}",
            col.avg_length, col.max_length
        );
    }

    println!();
    match report.suggestion {
        Some(s) => {
            println!(
                "Ready to process: textready split <file> {} {}",
                s.column, s.max_chars
            );
            println!(
                "(recommended limit: {}, accepted window: {}-{})",
                s.max_chars, bounds.min, bounds.max
            );
            Ok(())
        }
        None => {
            let letters: Vec<&str> = report.columns.iter().map(|c| c.letter.as_str()).collect();
            bail!(
                "Data exists in multiple columns: {}. Data must exist ONLY in one column.",
                letters.join(", ")
            );
        }
    }
}

fn show_info(input: &Path) -> Result<()> {
    let workbook =
        Workbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());

        match sheet.used_range() {
            Some(range) => {
                println!(
                    "    Used range: {} ({} rows x {} columns)",
                    range,
                    range.row_count(),
                    range.col_count()
                );
                println!("    Cells: {}", sheet.cell_count());
            }
            None => println!("    Used range: empty"),
        }
    }

    Ok(())
}
