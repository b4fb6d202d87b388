use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hppd_recon::pipeline::{self, RunConfig};
use hppd_recon::{ReconError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Reconcile(args) => execute_reconcile(args),
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|error| ReconError::Logging(error.to_string()))
}

fn execute_reconcile(args: ReconcileArgs) -> Result<()> {
    if !args.templates.is_dir() {
        return Err(ReconError::MissingInput(args.templates));
    }
    if !args.reports.is_dir() {
        return Err(ReconError::MissingInput(args.reports));
    }

    let config = RunConfig {
        templates_dir: args.templates,
        reports_dir: args.reports,
        target_date: args.date,
        output_path: args.output,
    };
    let summary = pipeline::run(&config)?;

    let categorized: usize = summary.tier_counts.iter().sum();
    println!(
        "wrote {} ({categorized} facilities categorized, {} inputs skipped)",
        summary.output_path.display(),
        summary.diagnostics.len()
    );
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile nurse staffing budgets against actual worked-hour reports."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare a folder of budget templates against a folder of worked-hour
    /// reports and write the categorized HPPD report.
    Reconcile(ReconcileArgs),
}

#[derive(clap::Args)]
struct ReconcileArgs {
    /// Folder of budget template workbooks (.xlsx).
    #[arg(long)]
    templates: PathBuf,

    /// Folder of legacy actual-hours report workbooks (.xls).
    #[arg(long)]
    reports: PathBuf,

    /// Only reconcile worksheets and reports covering this date (YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Destination path of the categorized report workbook (.xlsx).
    #[arg(long)]
    output: PathBuf,
}
