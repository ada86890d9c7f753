use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use eduloan_core::cash_flow::DEFAULT_HORIZON_YEARS;
use eduloan_core::sensitivity::{DEFAULT_RATE_DELTAS, DEFAULT_TENURE_YEARS};
use eduloan_core::tax::{DEFAULT_COMPARISON_BRACKETS, DEFAULT_PROJECTION_YEARS};
use eduloan_core::LoanParameters;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: serde::de::DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn render<T: serde::Serialize>(output: &T) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct LoanTermsInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
    #[serde(default)]
    yearly: bool,
}

#[derive(Deserialize)]
struct RateSensitivityInput {
    loan: LoanParameters,
    rate_deltas: Option<Vec<Decimal>>,
}

#[derive(Deserialize)]
struct TenureSensitivityInput {
    loan: LoanParameters,
    tenure_years: Option<Vec<u32>>,
}

#[derive(Deserialize)]
struct TaxInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    tax_bracket_percent: Decimal,
    year_count: Option<u32>,
}

#[derive(Deserialize)]
struct BracketComparisonInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    brackets: Option<Vec<Decimal>>,
}

#[derive(Deserialize)]
struct CashFlowInput {
    loan: LoanParameters,
    horizon_years: Option<Vec<u32>>,
}

// ---------------------------------------------------------------------------
// EMI & amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let input: LoanTermsInput = parse(&input_json)?;
    let emi = eduloan_core::emi::compute_emi(
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
    )
    .map_err(to_napi_error)?;
    render(&emi)
}

#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanTermsInput = parse(&input_json)?;
    let rows = eduloan_core::amortization::generate_schedule(
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
    )
    .map_err(to_napi_error)?;
    if input.yearly {
        render(&eduloan_core::amortization::summarize_by_year(&rows))
    } else {
        render(&rows)
    }
}

#[napi]
pub fn compare_scenarios(input_json: String) -> NapiResult<String> {
    let loan: LoanParameters = parse(&input_json)?;
    let output = eduloan_core::scenario::compare_scenarios(&loan).map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Sensitivity
// ---------------------------------------------------------------------------

#[napi]
pub fn rate_sensitivity(input_json: String) -> NapiResult<String> {
    let input: RateSensitivityInput = parse(&input_json)?;
    let deltas = input
        .rate_deltas
        .unwrap_or_else(|| DEFAULT_RATE_DELTAS.to_vec());
    let rows = eduloan_core::sensitivity::rate_sensitivity(&input.loan, &deltas)
        .map_err(to_napi_error)?;
    render(&rows)
}

#[napi]
pub fn tenure_sensitivity(input_json: String) -> NapiResult<String> {
    let input: TenureSensitivityInput = parse(&input_json)?;
    let years = input
        .tenure_years
        .unwrap_or_else(|| DEFAULT_TENURE_YEARS.to_vec());
    let rows = eduloan_core::sensitivity::tenure_sensitivity(&input.loan, &years)
        .map_err(to_napi_error)?;
    render(&rows)
}

// ---------------------------------------------------------------------------
// Tax & cash flow
// ---------------------------------------------------------------------------

#[napi]
pub fn project_tax_benefits(input_json: String) -> NapiResult<String> {
    let input: TaxInput = parse(&input_json)?;
    let rows = eduloan_core::tax::project_tax_benefits(
        input.principal,
        input.annual_rate_percent,
        input.tax_bracket_percent,
        input.year_count.unwrap_or(DEFAULT_PROJECTION_YEARS),
    )
    .map_err(to_napi_error)?;
    render(&rows)
}

#[napi]
pub fn compare_tax_brackets(input_json: String) -> NapiResult<String> {
    let input: BracketComparisonInput = parse(&input_json)?;
    let brackets = input
        .brackets
        .unwrap_or_else(|| DEFAULT_COMPARISON_BRACKETS.to_vec());
    let rows = eduloan_core::tax::bracket_comparison(
        input.principal,
        input.annual_rate_percent,
        &brackets,
    )
    .map_err(to_napi_error)?;
    render(&rows)
}

#[napi]
pub fn analyze_cash_flow(input_json: String) -> NapiResult<String> {
    let input: CashFlowInput = parse(&input_json)?;
    let horizons = input
        .horizon_years
        .unwrap_or_else(|| DEFAULT_HORIZON_YEARS.to_vec());
    let summary =
        eduloan_core::cash_flow::analyze_cash_flow_with_horizons(&input.loan, &horizons)
            .map_err(to_napi_error)?;
    render(&summary)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_loan(input_json: String) -> NapiResult<String> {
    let loan: LoanParameters = parse(&input_json)?;
    let output = eduloan_core::report::analyze_loan(&loan).map_err(to_napi_error)?;
    render(&output)
}
