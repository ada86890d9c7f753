mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cash_flow::{CashFlowArgs, ReportArgs};
use commands::emi::{CompareArgs, EmiArgs};
use commands::schedule::ScheduleArgs;
use commands::sensitivity::{RateSensitivityArgs, TenureSensitivityArgs};
use commands::tax::TaxArgs;

/// Education loan repayment scenario analysis
#[derive(Parser)]
#[command(
    name = "eduloan",
    version,
    about = "Compare paying accrued education-loan interest upfront vs adding it to principal",
    long_about = "A CLI for analysing an education loan under two repayment scenarios \
                  with decimal precision. Supports EMI, amortisation schedules, rate and \
                  tenure sensitivity, tax-benefit projection and break-even analysis."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Equated monthly instalment for one scenario
    Emi(EmiArgs),
    /// Side-by-side EMI, total payment and total interest of both scenarios
    Compare(CompareArgs),
    /// Month-by-month (or yearly) amortisation schedule
    Schedule(ScheduleArgs),
    /// EMI of both scenarios across shifted interest rates
    RateSensitivity(RateSensitivityArgs),
    /// EMI of both scenarios across alternative tenures
    TenureSensitivity(TenureSensitivityArgs),
    /// Yearly interest deduction and tax saving projection
    Tax(TaxArgs),
    /// Monthly savings, break-even and cumulative savings
    CashFlow(CashFlowArgs),
    /// Every analysis in one report
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args),
        Commands::Compare(args) => commands::emi::run_compare(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::RateSensitivity(args) => commands::sensitivity::run_rate_sensitivity(args),
        Commands::TenureSensitivity(args) => commands::sensitivity::run_tenure_sensitivity(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::CashFlow(args) => commands::cash_flow::run_cash_flow(args),
        Commands::Report(args) => commands::cash_flow::run_report(args),
        Commands::Version => {
            println!("eduloan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
