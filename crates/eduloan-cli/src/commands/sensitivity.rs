use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use eduloan_core::sensitivity::{self, DEFAULT_RATE_DELTAS, DEFAULT_TENURE_YEARS};
use eduloan_core::with_metadata;

use super::loan::{loan_assumptions, LoanArgs};

/// Arguments for rate sensitivity
#[derive(Args)]
pub struct RateSensitivityArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Rate shifts in percentage points (comma-separated, e.g. "-1,-0.5,0,0.5,1")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub deltas: Option<Vec<Decimal>>,
}

/// Arguments for tenure sensitivity
#[derive(Args)]
pub struct TenureSensitivityArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Tenures in years (comma-separated, e.g. "10,15,20")
    #[arg(long, value_delimiter = ',')]
    pub years: Option<Vec<u32>>,
}

pub fn run_rate_sensitivity(args: RateSensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let deltas = args.deltas.unwrap_or_else(|| DEFAULT_RATE_DELTAS.to_vec());
    let rows = sensitivity::rate_sensitivity(&loan, &deltas)?;

    let output = with_metadata(
        "Interest Rate Sensitivity",
        &loan_assumptions(&loan),
        Vec::new(),
        rows,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_tenure_sensitivity(
    args: TenureSensitivityArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let years = args.years.unwrap_or_else(|| DEFAULT_TENURE_YEARS.to_vec());
    let rows = sensitivity::tenure_sensitivity(&loan, &years)?;

    let output = with_metadata(
        "Loan Tenure Sensitivity",
        &loan_assumptions(&loan),
        Vec::new(),
        rows,
    );
    Ok(serde_json::to_value(output)?)
}
