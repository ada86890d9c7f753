use clap::Args;
use serde_json::Value;

use eduloan_core::emi::{self, total_payment};
use eduloan_core::scenario::{self, RepaymentScenario};
use eduloan_core::with_metadata;

use super::loan::{loan_assumptions, LoanArgs, ScenarioArg};

/// Arguments for a single-scenario EMI
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Which principal to amortise
    #[arg(long, value_enum, default_value = "upfront")]
    pub scenario: ScenarioArg,
}

/// Arguments for the scenario comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let scenario: RepaymentScenario = args.scenario.into();
    let principal = scenario.principal_for(&loan);

    let emi = emi::compute_emi(principal, loan.annual_rate_percent, loan.tenure_months)?;
    let paid = total_payment(emi, loan.tenure_months);

    let output = with_metadata(
        "Equated Monthly Instalment (annuity formula)",
        &loan_assumptions(&loan),
        Vec::new(),
        serde_json::json!({
            "scenario": scenario,
            "principal": principal,
            "emi": emi,
            "total_payment": paid,
            "total_interest": paid - principal,
        }),
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let comparison = scenario::compare_scenarios(&loan)?;

    let output = with_metadata(
        "Repayment Scenario Comparison",
        &loan_assumptions(&loan),
        Vec::new(),
        comparison,
    );
    Ok(serde_json::to_value(output)?)
}
