use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::emi::{compute_emi, monthly_rate};
use crate::types::{Money, Percent};
use crate::EduLoanResult;

/// Residual balance below which the final month is treated as fully repaid.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.000001);

const MONTHS_PER_YEAR: usize = 12;

/// A single month in the amortisation schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month_index: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub ending_balance: Money,
}

/// Twelve schedule rows (fewer for a trailing partial year) rolled together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year_index: u32,
    pub months: u32,
    pub opening_balance: Money,
    pub total_payment: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

/// Build the month-by-month schedule for a level-payment loan.
///
/// The scheduler knows nothing about repayment scenarios: callers choose the
/// starting principal (original or capitalised) and pass it in.
pub fn generate_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: u32,
) -> EduLoanResult<Vec<AmortizationRow>> {
    let emi = compute_emi(principal, annual_rate_percent, tenure_months)?;
    let rate = monthly_rate(annual_rate_percent);

    let mut rows = Vec::new();
    let mut balance = principal;

    for month in 1..=tenure_months {
        let opening = balance;
        let interest = opening * rate;
        let principal_component = emi - interest;
        let mut closing = opening - principal_component;

        // Rounding drift must not leave a negative or dust balance at maturity
        if closing < Decimal::ZERO
            || (month == tenure_months && closing.abs() <= BALANCE_TOLERANCE)
        {
            closing = Decimal::ZERO;
        }

        rows.push(AmortizationRow {
            month_index: month,
            beginning_balance: opening,
            payment_amount: emi,
            principal_component,
            interest_component: interest,
            ending_balance: closing,
        });

        balance = closing;
    }

    log::debug!(
        "amortisation schedule: principal={principal} rate={annual_rate_percent}% months={tenure_months} emi={emi}"
    );

    Ok(rows)
}

/// Roll a monthly schedule up into loan years.
pub fn summarize_by_year(rows: &[AmortizationRow]) -> Vec<AmortizationYear> {
    rows.chunks(MONTHS_PER_YEAR)
        .enumerate()
        .filter_map(|(idx, chunk)| {
            let first = chunk.first()?;
            let last = chunk.last()?;
            Some(AmortizationYear {
                year_index: idx as u32 + 1,
                months: chunk.len() as u32,
                opening_balance: first.beginning_balance,
                total_payment: chunk.iter().map(|r| r.payment_amount).sum(),
                principal_paid: chunk.iter().map(|r| r.principal_component).sum(),
                interest_paid: chunk.iter().map(|r| r.interest_component).sum(),
                closing_balance: last.ending_balance,
            })
        })
        .collect()
}
