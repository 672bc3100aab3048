use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use salary_core::{PayrollConfig, SalaryCalculator, TaxSchedule, compute_batch};
use salary_data::{EmployeeSheetLoader, TaxScheduleLoader, write_results};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compute net salaries for every employee in a CSV sheet.
///
/// The sheet must have the columns `ID`, `Employee Name`, `Gross Salary`
/// and `Number of Dependents`. Results are written as CSV with an extra
/// `Net Salary` column.
#[derive(Parser, Debug)]
#[command(name = "salary-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the employee sheet (CSV)
    #[arg(short, long)]
    file: PathBuf,

    /// Optional tax schedule CSV (`upper_limit,rate`); the built-in
    /// schedule is used when omitted
    #[arg(short, long)]
    schedule: Option<PathBuf>,

    /// Write results here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let schedule = match &args.schedule {
        Some(path) => TaxScheduleLoader::load_from_file(path)
            .with_context(|| format!("Failed to load tax schedule: {}", path.display()))?,
        None => TaxSchedule::default(),
    };
    let config = PayrollConfig::default();
    let calculator = SalaryCalculator::new(&schedule, &config);

    info!("Loading employees from: {}", args.file.display());

    let records = EmployeeSheetLoader::load_from_file(&args.file)
        .with_context(|| format!("Failed to read employee sheet: {}", args.file.display()))?;

    info!("Parsed {} employees", records.len());

    let results = compute_batch(&calculator, records);

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    write_results(writer, &results).context("Failed to write results")?;

    info!("Computed net salary for {} employees", results.len());

    Ok(())
}
