use clap::Args;
use serde_json::Value;

use rust_decimal::Decimal;

use eduloan_core::tax::{self, TaxTotals, DEFAULT_COMPARISON_BRACKETS, DEFAULT_PROJECTION_YEARS};
use eduloan_core::with_metadata;

use super::loan::{loan_assumptions, LoanArgs};

/// Arguments for the tax-benefit projection
#[derive(Args)]
pub struct TaxArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Number of years to project
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    pub years: u32,

    /// Brackets for the first-year comparison (comma-separated, e.g. "5,20,30")
    #[arg(long, value_delimiter = ',')]
    pub brackets: Option<Vec<Decimal>>,
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let rows = tax::project_tax_benefits(
        loan.original_principal,
        loan.annual_rate_percent,
        loan.tax_bracket_percent,
        args.years,
    )?;
    let totals = TaxTotals::from_rows(&rows);
    let brackets = args
        .brackets
        .unwrap_or_else(|| DEFAULT_COMPARISON_BRACKETS.to_vec());
    let comparison = tax::bracket_comparison(
        loan.original_principal,
        loan.annual_rate_percent,
        &brackets,
    )?;

    let output = with_metadata(
        "Tax Benefit Projection (flat 5% annual principal reduction)",
        &loan_assumptions(&loan),
        vec!["Principal decay is a flat approximation, not the amortisation schedule".into()],
        serde_json::json!({
            "projection": rows,
            "totals": totals,
            "bracket_comparison": comparison,
        }),
    );
    Ok(serde_json::to_value(output)?)
}
