use clap::Args;
use serde_json::Value;

use eduloan_core::cash_flow::{self, BreakEven, DEFAULT_HORIZON_YEARS};
use eduloan_core::report;
use eduloan_core::with_metadata;

use super::loan::{loan_assumptions, LoanArgs};

/// Arguments for the cash flow / break-even analysis
#[derive(Args)]
pub struct CashFlowArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Savings horizons in years (comma-separated, e.g. "5,10,15")
    #[arg(long, value_delimiter = ',')]
    pub horizons: Option<Vec<u32>>,
}

/// Arguments for the full report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_cash_flow(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let horizons = args.horizons.unwrap_or_else(|| DEFAULT_HORIZON_YEARS.to_vec());
    let summary = cash_flow::analyze_cash_flow_with_horizons(&loan, &horizons)?;

    let mut warnings = Vec::new();
    match &summary.break_even {
        BreakEven::NotApplicable => {
            warnings.push("Break-even not applicable: monthly savings are not positive".to_string())
        }
        BreakEven::Reached {
            within_tenure: false,
            ..
        } => warnings.push("Break-even falls after the final instalment".to_string()),
        BreakEven::Reached { .. } => {}
    }

    let output = with_metadata(
        "Cash Flow Break-even Analysis",
        &loan_assumptions(&loan),
        warnings,
        summary,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let output = report::analyze_loan(&loan)?;
    Ok(serde_json::to_value(output)?)
}
