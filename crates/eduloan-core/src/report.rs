use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{summarize_by_year, AmortizationYear};
use crate::cash_flow::{analyze_cash_flow, BreakEven, CashFlowSummary};
use crate::scenario::{compare_scenarios, schedule_for_scenario, RepaymentScenario, ScenarioComparison};
use crate::sensitivity::{rate_sensitivity, tenure_sensitivity, SensitivityRow, DEFAULT_RATE_DELTAS, DEFAULT_TENURE_YEARS};
use crate::tax::{
    bracket_comparison, project_tax_benefits, BracketSaving, TaxTotals, TaxYearProjection,
    DEFAULT_COMPARISON_BRACKETS, DEFAULT_PROJECTION_YEARS,
};
use crate::types::*;
use crate::validation::validate_loan;
use crate::EduLoanResult;

/// Everything known about one loan, both scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanReport {
    pub comparison: ScenarioComparison,
    pub yearly_schedule_pay_upfront: Vec<AmortizationYear>,
    pub yearly_schedule_add_to_principal: Vec<AmortizationYear>,
    pub rate_sensitivity: Vec<SensitivityRow>,
    pub tenure_sensitivity: Vec<SensitivityRow>,
    pub tax_projection: Vec<TaxYearProjection>,
    pub tax_totals: TaxTotals,
    pub tax_bracket_comparison: Vec<BracketSaving>,
    pub cash_flow: CashFlowSummary,
}

/// Run every analysis for a loan and wrap the result in the standard envelope.
pub fn analyze_loan(loan: &LoanParameters) -> EduLoanResult<ComputationOutput<LoanReport>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_loan(loan)?;

    let gap = loan.capitalisation_gap();
    if !gap.is_zero() {
        warnings.push(format!(
            "Current outstanding differs from original principal plus accrued interest by {gap}; \
             the scenarios are not directly comparable"
        ));
    }

    let comparison = compare_scenarios(loan)?;

    let upfront = schedule_for_scenario(loan, RepaymentScenario::PayUpfront)?;
    let capitalised = schedule_for_scenario(loan, RepaymentScenario::AddToPrincipal)?;

    // Shifts below a zero rate are dropped from the standard grid rather than failing the report
    let deltas: Vec<Decimal> = DEFAULT_RATE_DELTAS
        .iter()
        .copied()
        .filter(|d| {
            let usable = loan.annual_rate_percent + d >= Decimal::ZERO;
            if !usable {
                warnings.push(format!(
                    "Rate shift {d} skipped: rate would fall below zero"
                ));
            }
            usable
        })
        .collect();
    let rate_rows = rate_sensitivity(loan, &deltas)?;
    let tenure_rows = tenure_sensitivity(loan, &DEFAULT_TENURE_YEARS)?;

    let tax_projection = project_tax_benefits(
        loan.original_principal,
        loan.annual_rate_percent,
        loan.tax_bracket_percent,
        DEFAULT_PROJECTION_YEARS,
    )?;
    let tax_totals = TaxTotals::from_rows(&tax_projection);
    let tax_bracket_comparison = bracket_comparison(
        loan.original_principal,
        loan.annual_rate_percent,
        &DEFAULT_COMPARISON_BRACKETS,
    )?;
    warnings.push(
        "Tax projection assumes principal falls a flat 5% per year, independent of the amortisation schedule"
            .into(),
    );

    let cash_flow = analyze_cash_flow(loan)?;
    match &cash_flow.break_even {
        BreakEven::NotApplicable => warnings.push(
            "Monthly savings are not positive; paying accrued interest upfront is never recovered"
                .into(),
        ),
        BreakEven::Reached {
            months,
            within_tenure: false,
            ..
        } => warnings.push(format!(
            "Break-even at {months} months falls after the {} month tenure",
            loan.tenure_months
        )),
        BreakEven::Reached { .. } => {}
    }

    for w in &warnings {
        log::warn!("{w}");
    }

    let output = LoanReport {
        comparison,
        yearly_schedule_pay_upfront: summarize_by_year(&upfront),
        yearly_schedule_add_to_principal: summarize_by_year(&capitalised),
        rate_sensitivity: rate_rows,
        tenure_sensitivity: tenure_rows,
        tax_projection,
        tax_totals,
        tax_bracket_comparison,
        cash_flow,
    };

    Ok(with_metadata(
        "Education Loan Scenario Analysis (pay upfront vs capitalise)",
        &serde_json::json!({
            "original_principal": loan.original_principal.to_string(),
            "current_outstanding": loan.current_outstanding.to_string(),
            "annual_rate_percent": loan.annual_rate_percent.to_string(),
            "tenure_months": loan.tenure_months,
            "tax_bracket_percent": loan.tax_bracket_percent.to_string(),
            "accrued_interest_upfront": loan.accrued_interest_upfront.to_string(),
            "tax_principal_decay": "5% per year",
        }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_report() {
        let out = analyze_loan(&LoanParameters::default()).unwrap();
        let report = &out.result;

        assert_eq!(report.yearly_schedule_pay_upfront.len(), 15);
        assert_eq!(report.yearly_schedule_add_to_principal.len(), 15);
        assert_eq!(report.rate_sensitivity.len(), 6);
        assert_eq!(report.tenure_sensitivity.len(), 5);
        assert_eq!(report.tax_projection.len(), 5);
        assert_eq!(report.tax_bracket_comparison.len(), 3);
        assert_eq!(report.tax_bracket_comparison[0].tax_saving, dec!(7233.125));
        assert_eq!(report.cash_flow.break_even.months(), Some(104));

        // Consistent default loan: only the tax approximation note
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("flat 5%"));
    }

    #[test]
    fn test_inconsistent_outstanding_warns() {
        let mut loan = LoanParameters::default();
        loan.current_outstanding = dec!(2000000);
        let out = analyze_loan(&loan).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("not directly comparable")));
    }

    #[test]
    fn test_low_rate_drops_negative_shifts() {
        let mut loan = LoanParameters::default();
        loan.annual_rate_percent = dec!(0.75);
        let out = analyze_loan(&loan).unwrap();
        // -1 is dropped, -0.5 survives
        assert_eq!(out.result.rate_sensitivity.len(), 5);
        assert_eq!(out.result.rate_sensitivity[0].parameter_value, dec!(0.25));
        assert!(out.warnings.iter().any(|w| w.contains("Rate shift -1 skipped")));
    }

    #[test]
    fn test_non_positive_savings_warns() {
        let mut loan = LoanParameters::default();
        loan.current_outstanding = loan.original_principal;
        loan.accrued_interest_upfront = Decimal::ZERO;
        let out = analyze_loan(&loan).unwrap();
        assert_eq!(out.result.cash_flow.break_even, BreakEven::NotApplicable);
        assert!(out.warnings.iter().any(|w| w.contains("never recovered")));
    }

    #[test]
    fn test_report_is_deterministic() {
        let a = serde_json::to_value(analyze_loan(&LoanParameters::default()).unwrap()).unwrap();
        let b = serde_json::to_value(analyze_loan(&LoanParameters::default()).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_loan_fails_whole_report() {
        let mut loan = LoanParameters::default();
        loan.tenure_months = 0;
        assert!(analyze_loan(&loan).is_err());
    }
}
