use clap::Args;
use serde_json::Value;

use eduloan_core::amortization::summarize_by_year;
use eduloan_core::scenario::{schedule_for_scenario, RepaymentScenario};
use eduloan_core::with_metadata;

use super::loan::{loan_assumptions, LoanArgs, ScenarioArg};

/// Arguments for the amortisation schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Which principal to amortise
    #[arg(long, value_enum, default_value = "upfront")]
    pub scenario: ScenarioArg,

    /// Roll months up into loan years
    #[arg(long)]
    pub yearly: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.resolve()?;
    let scenario: RepaymentScenario = args.scenario.into();
    let rows = schedule_for_scenario(&loan, scenario)?;

    let methodology = format!("Amortisation Schedule ({})", scenario.label());
    let result = if args.yearly {
        serde_json::to_value(summarize_by_year(&rows))?
    } else {
        serde_json::to_value(rows)?
    };

    let output = with_metadata(&methodology, &loan_assumptions(&loan), Vec::new(), result);
    Ok(serde_json::to_value(output)?)
}
