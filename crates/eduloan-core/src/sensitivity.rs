use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::emi::compute_emi;
use crate::error::EduLoanError;
use crate::types::{LoanParameters, Money, Percent};
use crate::EduLoanResult;

/// Rate shifts (percentage points) shown alongside the base rate.
pub const DEFAULT_RATE_DELTAS: [Decimal; 6] =
    [dec!(-1), dec!(-0.5), dec!(0), dec!(0.5), dec!(1), dec!(1.5)];

/// Tenures (years) compared against each other.
pub const DEFAULT_TENURE_YEARS: [u32; 5] = [10, 12, 15, 18, 20];

/// One perturbed input and the EMI of both scenarios under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityRow {
    /// Perturbed annual rate (percent) or tenure (years)
    pub parameter_value: Decimal,
    pub emi_scenario_a: Money,
    pub emi_scenario_b: Money,
    pub monthly_difference: Money,
    pub total_difference_over_tenure: Money,
}

fn scenario_row(
    loan: &LoanParameters,
    parameter_value: Decimal,
    rate: Percent,
    tenure_months: u32,
) -> EduLoanResult<SensitivityRow> {
    let emi_a = compute_emi(loan.original_principal, rate, tenure_months)?;
    let emi_b = compute_emi(loan.current_outstanding, rate, tenure_months)?;
    let monthly_difference = emi_b - emi_a;

    Ok(SensitivityRow {
        parameter_value,
        emi_scenario_a: emi_a,
        emi_scenario_b: emi_b,
        monthly_difference,
        total_difference_over_tenure: monthly_difference * Decimal::from(tenure_months),
    })
}

/// Re-price both scenarios with the annual rate shifted by each delta.
///
/// Rows come back in the order the deltas were given. A delta that takes the
/// rate below zero fails the whole call.
pub fn rate_sensitivity(
    loan: &LoanParameters,
    rate_deltas: &[Decimal],
) -> EduLoanResult<Vec<SensitivityRow>> {
    let rows = rate_deltas
        .iter()
        .enumerate()
        .map(|(i, delta)| {
            let rate = loan.annual_rate_percent + delta;
            if rate < Decimal::ZERO {
                return Err(EduLoanError::InvalidParameter {
                    field: format!("rate_deltas[{i}]"),
                    reason: format!(
                        "Shift {delta} takes the rate to {rate}%, below zero"
                    ),
                });
            }
            scenario_row(loan, rate, rate, loan.tenure_months)
        })
        .collect::<EduLoanResult<Vec<_>>>()?;

    log::debug!("rate sensitivity: {} rows", rows.len());
    Ok(rows)
}

/// Re-price both scenarios at each tenure, given in whole years.
pub fn tenure_sensitivity(
    loan: &LoanParameters,
    tenure_years: &[u32],
) -> EduLoanResult<Vec<SensitivityRow>> {
    let rows = tenure_years
        .iter()
        .enumerate()
        .map(|(i, &years)| {
            let months = years
                .checked_mul(12)
                .filter(|m| *m > 0)
                .ok_or_else(|| EduLoanError::InvalidParameter {
                    field: format!("tenure_years[{i}]"),
                    reason: format!("Tenure of {years} years is not a usable month count"),
                })?;
            scenario_row(loan, Decimal::from(years), loan.annual_rate_percent, months)
        })
        .collect::<EduLoanResult<Vec<_>>>()?;

    log::debug!("tenure sensitivity: {} rows", rows.len());
    Ok(rows)
}
