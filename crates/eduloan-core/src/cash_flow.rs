use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::emi::compute_emi;
use crate::error::EduLoanError;
use crate::types::{LoanParameters, Money, Percent};
use crate::validation::validate_loan;
use crate::EduLoanResult;

/// Horizons (years) at which cumulative savings are reported.
pub const DEFAULT_HORIZON_YEARS: [u32; 3] = [5, 10, 15];

/// When, if ever, paying accrued interest upfront pays for itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEven {
    /// Monthly savings are zero or negative; the upfront payment is never recovered
    NotApplicable,
    Reached {
        months: u64,
        years: Decimal,
        /// Break-even as a share of tenure, capped at 100
        tenure_percentage: Percent,
        /// False when break-even falls after the final instalment
        within_tenure: bool,
    },
}

impl BreakEven {
    pub fn months(&self) -> Option<u64> {
        match self {
            BreakEven::NotApplicable => None,
            BreakEven::Reached { months, .. } => Some(*months),
        }
    }
}

/// Net savings of the upfront scenario after a fixed number of years
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonSavings {
    pub years: u32,
    pub months: u32,
    /// Horizon months actually paid, never beyond tenure
    pub effective_months: u32,
    /// Savings net of the upfront payment, floored at zero
    pub net_savings: Money,
}

/// Side-by-side monthly cost of the two repayment scenarios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub emi_scenario_a: Money,
    pub emi_scenario_b: Money,
    pub monthly_savings: Money,
    pub break_even: BreakEven,
    pub cumulative_savings: Vec<HorizonSavings>,
}

fn locate_break_even(
    accrued: Money,
    monthly_savings: Money,
    tenure_months: u32,
) -> EduLoanResult<BreakEven> {
    if monthly_savings <= Decimal::ZERO {
        return Ok(BreakEven::NotApplicable);
    }

    let months = accrued
        .checked_div(monthly_savings)
        .map(|m| m.ceil())
        .and_then(|m| m.to_u64())
        .ok_or_else(|| {
            EduLoanError::FinancialImpossibility(format!(
                "Break-even of {accrued} at {monthly_savings} per month exceeds any month count"
            ))
        })?;

    let tenure = Decimal::from(tenure_months);
    let months_dec = Decimal::from(months);
    let percentage = months_dec / tenure * dec!(100);

    Ok(BreakEven::Reached {
        months,
        years: months_dec / dec!(12),
        tenure_percentage: percentage.min(dec!(100)),
        within_tenure: months <= u64::from(tenure_months),
    })
}

/// Compare both scenarios' instalments and cumulative savings at the
/// standard 5, 10 and 15 year horizons.
pub fn analyze_cash_flow(loan: &LoanParameters) -> EduLoanResult<CashFlowSummary> {
    analyze_cash_flow_with_horizons(loan, &DEFAULT_HORIZON_YEARS)
}

/// As [`analyze_cash_flow`] with caller-chosen horizons, reported in the
/// order given.
pub fn analyze_cash_flow_with_horizons(
    loan: &LoanParameters,
    horizon_years: &[u32],
) -> EduLoanResult<CashFlowSummary> {
    validate_loan(loan)?;

    let emi_a = compute_emi(loan.original_principal, loan.annual_rate_percent, loan.tenure_months)?;
    let emi_b = compute_emi(loan.current_outstanding, loan.annual_rate_percent, loan.tenure_months)?;
    let monthly_savings = emi_b - emi_a;
    let accrued = loan.accrued_interest_upfront;

    let cumulative_savings = horizon_years
        .iter()
        .enumerate()
        .map(|(i, &years)| -> EduLoanResult<HorizonSavings> {
            let months = years
                .checked_mul(12)
                .filter(|m| *m > 0)
                .ok_or_else(|| EduLoanError::InvalidParameter {
                    field: format!("horizon_years[{i}]"),
                    reason: format!("Horizon of {years} years is not a usable month count"),
                })?;
            let effective_months = months.min(loan.tenure_months);
            let net = Decimal::from(effective_months) * monthly_savings - accrued;
            Ok(HorizonSavings {
                years,
                months,
                effective_months,
                net_savings: net.max(Decimal::ZERO),
            })
        })
        .collect::<EduLoanResult<Vec<_>>>()?;

    let break_even = locate_break_even(accrued, monthly_savings, loan.tenure_months)?;
    log::debug!(
        "cash flow: monthly savings {monthly_savings}, break-even {:?}",
        break_even.months()
    );

    Ok(CashFlowSummary {
        emi_scenario_a: emi_a,
        emi_scenario_b: emi_b,
        monthly_savings,
        break_even,
        cumulative_savings,
    })
}
