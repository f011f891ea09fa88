//! # decomchart-cli
//!
//! Command-line interface for the decomchart pipeline: load the two plant
//! trackers, derive cumulative planned-retirement series for Europe, write
//! the stacked-area dashboard, and print summary statistics.

use anyhow::{Context, Result};
use clap::Parser;
use decomchart_pipeline::{aggregate, normalize, records_to_sheet};
use decomchart_sheet::{CsvOptions, Sheet, XlsxReadOptions};
use decomchart_viz::{summary, Dashboard};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// decomchart - cumulative power-plant decommissioning charts for Europe
#[derive(Parser)]
#[command(name = "decomchart")]
#[command(author, version, about = "Plot planned coal and gas plant retirements by country", long_about = None)]
struct Cli {
    /// Gas & oil plant tracker workbook (.xlsx or .csv)
    #[arg(long = "gas-file", value_name = "FILE")]
    gas_file: PathBuf,

    /// Coal plant tracker workbook (.xlsx or .csv)
    #[arg(long = "coal-file", value_name = "FILE")]
    coal_file: PathBuf,

    /// Worksheet name in the gas workbook
    #[arg(long = "gas-sheet", default_value = "Gas & Oil Units")]
    gas_sheet: String,

    /// Worksheet name in the coal workbook
    #[arg(long = "coal-sheet", default_value = "Units")]
    coal_sheet: String,

    /// Output HTML file for the two-panel dashboard
    #[arg(short = 'o', long = "out", default_value = "decommissions.html")]
    out: PathBuf,

    /// Also write the normalized unified table as CSV
    #[arg(long = "export", value_name = "FILE")]
    export: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let gas = load_table(&cli.gas_file, &cli.gas_sheet)
        .with_context(|| format!("Failed to load gas tracker: {}", cli.gas_file.display()))?;
    let coal = load_table(&cli.coal_file, &cli.coal_sheet)
        .with_context(|| format!("Failed to load coal tracker: {}", cli.coal_file.display()))?;

    let records = normalize(gas, coal).context("Failed to normalize tracker tables")?;

    if let Some(export_path) = &cli.export {
        records_to_sheet(&records)
            .save_as_csv(export_path)
            .with_context(|| format!("Failed to export: {}", export_path.display()))?;
        tracing::info!(path = %export_path.display(), "wrote normalized table");
    }

    let outlook = aggregate(&records);

    let html = Dashboard::from_outlook(&outlook)
        .to_html()
        .context("Failed to render dashboard")?;
    std::fs::write(&cli.out, html)
        .with_context(|| format!("Failed to write: {}", cli.out.display()))?;

    print!("{}", summary(&outlook));
    Ok(())
}

/// Load one tracker table, dispatching on file extension. CSV inputs ignore
/// the worksheet name.
fn load_table(path: &Path, sheet_name: &str) -> Result<Sheet> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let sheet = if is_csv {
        Sheet::from_csv_with_options(path, CsvOptions::default().with_headers(true))?
    } else {
        Sheet::from_xlsx_sheet_with_options(
            path,
            sheet_name,
            XlsxReadOptions::default().with_headers(true),
        )?
    };
    Ok(sheet)
}
