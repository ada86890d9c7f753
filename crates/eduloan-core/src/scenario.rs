use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::emi::{compute_emi, monthly_interest, total_payment};
use crate::types::{LoanParameters, Money, Percent};
use crate::validation::validate_loan;
use crate::EduLoanResult;

#[cfg(feature = "amortization")]
use crate::amortization::{generate_schedule, AmortizationRow};

/// How the borrower settles interest accrued before repayment starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentScenario {
    /// Scenario A: accrued interest is paid now, the loan runs on the original principal
    PayUpfront,
    /// Scenario B: accrued interest is capitalised into the outstanding balance
    AddToPrincipal,
}

impl RepaymentScenario {
    pub const ALL: [RepaymentScenario; 2] =
        [RepaymentScenario::PayUpfront, RepaymentScenario::AddToPrincipal];

    /// Starting principal this scenario amortises from.
    pub fn principal_for(self, loan: &LoanParameters) -> Money {
        match self {
            RepaymentScenario::PayUpfront => loan.original_principal,
            RepaymentScenario::AddToPrincipal => loan.current_outstanding,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepaymentScenario::PayUpfront => "Pay Interest Upfront",
            RepaymentScenario::AddToPrincipal => "Add to Principal",
        }
    }
}

/// Lifetime cost of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFigures {
    pub scenario: RepaymentScenario,
    pub principal: Money,
    pub emi: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

/// Both scenarios priced on the same rate and tenure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub pay_upfront: ScenarioFigures,
    pub add_to_principal: ScenarioFigures,
    pub monthly_difference: Money,
    pub total_difference_over_tenure: Money,
    /// Interest as a share of everything paid under the upfront scenario
    pub interest_ratio_percent: Percent,
    /// First month's interest on the capitalised balance
    pub monthly_interest_on_outstanding: Money,
}

fn figures(loan: &LoanParameters, scenario: RepaymentScenario) -> EduLoanResult<ScenarioFigures> {
    let principal = scenario.principal_for(loan);
    let emi = compute_emi(principal, loan.annual_rate_percent, loan.tenure_months)?;
    let paid = total_payment(emi, loan.tenure_months);
    Ok(ScenarioFigures {
        scenario,
        principal,
        emi,
        total_payment: paid,
        total_interest: paid - principal,
    })
}

/// Price both repayment scenarios side by side.
pub fn compare_scenarios(loan: &LoanParameters) -> EduLoanResult<ScenarioComparison> {
    validate_loan(loan)?;

    let upfront = figures(loan, RepaymentScenario::PayUpfront)?;
    let capitalised = figures(loan, RepaymentScenario::AddToPrincipal)?;
    let monthly_difference = capitalised.emi - upfront.emi;

    let interest_ratio_percent = if upfront.total_payment.is_zero() {
        Decimal::ZERO
    } else {
        upfront.total_interest / upfront.total_payment * dec!(100)
    };

    Ok(ScenarioComparison {
        monthly_difference,
        total_difference_over_tenure: monthly_difference * Decimal::from(loan.tenure_months),
        interest_ratio_percent,
        monthly_interest_on_outstanding: monthly_interest(
            loan.current_outstanding,
            loan.annual_rate_percent,
        ),
        pay_upfront: upfront,
        add_to_principal: capitalised,
    })
}

/// Amortisation schedule for a scenario. The tag is resolved to a principal
/// here; the scheduler itself stays scenario-agnostic.
#[cfg(feature = "amortization")]
pub fn schedule_for_scenario(
    loan: &LoanParameters,
    scenario: RepaymentScenario,
) -> EduLoanResult<Vec<AmortizationRow>> {
    generate_schedule(
        scenario.principal_for(loan),
        loan.annual_rate_percent,
        loan.tenure_months,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_mapping() {
        let loan = LoanParameters::default();
        assert_eq!(RepaymentScenario::PayUpfront.principal_for(&loan), dec!(1775000));
        assert_eq!(RepaymentScenario::AddToPrincipal.principal_for(&loan), dec!(1965994));
    }

    #[test]
    fn test_reference_comparison() {
        let cmp = compare_scenarios(&LoanParameters::default()).unwrap();
        assert!(cmp.add_to_principal.emi > cmp.pay_upfront.emi);
        assert_eq!(
            cmp.monthly_difference,
            cmp.add_to_principal.emi - cmp.pay_upfront.emi
        );
        assert_eq!(
            cmp.pay_upfront.total_interest,
            cmp.pay_upfront.total_payment - dec!(1775000)
        );
        // Upfront scenario pays ~1,306,040 interest on ~3,081,040 total
        assert!(cmp.interest_ratio_percent > dec!(42) && cmp.interest_ratio_percent < dec!(43));
        // 1,965,994 * 8.15 / 1200
        assert!((cmp.monthly_interest_on_outstanding - dec!(13352.38)).abs() < dec!(0.01));
    }

    #[test]
    fn test_zero_rate_comparison_has_no_interest() {
        let mut loan = LoanParameters::default();
        loan.annual_rate_percent = Decimal::ZERO;
        let cmp = compare_scenarios(&loan).unwrap();
        assert!(cmp.pay_upfront.total_interest.abs() < dec!(0.000001));
        assert!(cmp.interest_ratio_percent.abs() < dec!(0.000001));
        assert_eq!(cmp.monthly_interest_on_outstanding, Decimal::ZERO);
    }

    #[cfg(feature = "amortization")]
    #[test]
    fn test_schedule_for_scenario_uses_mapped_principal() {
        let loan = LoanParameters::default();
        let a = schedule_for_scenario(&loan, RepaymentScenario::PayUpfront).unwrap();
        let b = schedule_for_scenario(&loan, RepaymentScenario::AddToPrincipal).unwrap();
        assert_eq!(a[0].beginning_balance, loan.original_principal);
        assert_eq!(b[0].beginning_balance, loan.current_outstanding);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn test_scenario_serialises_snake_case() {
        let json = serde_json::to_value(RepaymentScenario::AddToPrincipal).unwrap();
        assert_eq!(json, serde_json::json!("add_to_principal"));
    }
}
