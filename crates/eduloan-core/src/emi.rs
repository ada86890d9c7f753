use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::EduLoanError;
use crate::types::{Money, Percent};
use crate::validation::{require_non_negative_rate, require_positive_money, require_positive_tenure};
use crate::EduLoanResult;

/// Months per year times the percent scale: annual percent -> monthly decimal.
const MONTHLY_RATE_DIVISOR: Decimal = dec!(1200);

/// Monthly decimal rate for an annual percentage (8.15 -> 0.0067916...).
pub fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / MONTHLY_RATE_DIVISOR
}

/// (1 + r)^n, or `None` once it leaves decimal range.
fn growth_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powu(u64::from(periods))
}

/// (1 + r)^-n. Shrinks towards zero, so it stays representable where
/// `growth_factor` overflows.
fn discount_factor(rate: Decimal, periods: u32) -> EduLoanResult<Decimal> {
    let step = Decimal::ONE
        .checked_div(Decimal::ONE + rate)
        .ok_or_else(|| EduLoanError::DivisionByZero {
            context: "EMI discount step".into(),
        })?;
    step.checked_powu(u64::from(periods)).ok_or_else(|| {
        EduLoanError::FinancialImpossibility(format!(
            "Discount factor out of range at monthly rate {rate} over {periods} months"
        ))
    })
}

/// Equated Monthly Instalment.
///
/// Uses the annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)` for a positive
/// monthly rate and straight division `P / n` at a zero rate, where the
/// annuity formula is 0/0.
pub fn compute_emi(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_months: u32,
) -> EduLoanResult<Money> {
    require_positive_money("principal", principal)?;
    require_non_negative_rate("annual_rate_percent", annual_rate_percent)?;
    require_positive_tenure("tenure_months", tenure_months)?;

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(principal / Decimal::from(tenure_months));
    }

    let overflow = || {
        EduLoanError::FinancialImpossibility(format!(
            "EMI for principal {principal} overflows decimal range"
        ))
    };

    let Some(factor) = growth_factor(rate, tenure_months) else {
        // P·r / (1 − (1+r)^−n): long tenures at high rates tend to P·r
        let denominator = Decimal::ONE - discount_factor(rate, tenure_months)?;
        if denominator.is_zero() {
            return Err(EduLoanError::DivisionByZero {
                context: "EMI annuity denominator".into(),
            });
        }
        return (principal * rate)
            .checked_div(denominator)
            .ok_or_else(overflow);
    };

    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(EduLoanError::DivisionByZero {
            context: "EMI annuity denominator".into(),
        });
    }

    // factor / denominator stays close to 1, keeping the product in range
    (principal * rate)
        .checked_mul(factor / denominator)
        .ok_or_else(overflow)
}

/// Total paid over the tenure at a constant instalment.
pub fn total_payment(emi: Money, tenure_months: u32) -> Money {
    emi * Decimal::from(tenure_months)
}

/// One month of simple interest on a balance.
pub fn monthly_interest(balance: Money, annual_rate_percent: Percent) -> Money {
    balance * monthly_rate(annual_rate_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emi_reference_loan() {
        let emi = compute_emi(dec!(1775000), dec!(8.15), 180).unwrap();
        // Standard annuity at r = 8.15/1200 over 15 years: ~17,116.89
        assert!(
            (emi - dec!(17116.89)).abs() < dec!(0.01),
            "Expected EMI ~17,116.89, got {emi}"
        );
    }

    #[test]
    fn test_emi_matches_closed_form() {
        let r = dec!(8.15) / dec!(1200);
        let f = (Decimal::ONE + r).powu(180);
        let expected = dec!(1775000) * r * f / (f - Decimal::ONE);
        let emi = compute_emi(dec!(1775000), dec!(8.15), 180).unwrap();
        assert!((emi - expected).abs() < dec!(0.000001));
    }

    #[test]
    fn test_emi_zero_rate_is_straight_division() {
        let emi = compute_emi(dec!(120000), Decimal::ZERO, 48).unwrap();
        assert_eq!(emi, dec!(120000) / dec!(48));
        assert_eq!(emi, dec!(2500));
    }

    #[test]
    fn test_emi_times_tenure_exceeds_principal() {
        for (p, rate, n) in [
            (dec!(1000), dec!(0.5), 12u32),
            (dec!(500000), dec!(12), 60),
            (dec!(1965994), dec!(8.15), 180),
            (dec!(250), dec!(100), 360),
        ] {
            let emi = compute_emi(p, rate, n).unwrap();
            assert!(total_payment(emi, n) > p, "rate {rate} tenure {n}");
        }
    }

    #[test]
    fn test_emi_high_rate_long_tenure_tends_to_interest_only() {
        for (p, rate, n) in [
            (dec!(100000), dec!(100), 900u32),
            (dec!(100000), dec!(24), 4000),
        ] {
            let emi = compute_emi(p, rate, n).unwrap();
            let interest_only = p * monthly_rate(rate);
            assert!(emi >= interest_only, "rate {rate} tenure {n}: {emi}");
            assert!(
                (emi - interest_only).abs() < dec!(0.01),
                "rate {rate} tenure {n}: expected ~{interest_only}, got {emi}"
            );
        }
    }

    #[test]
    fn test_discount_form_agrees_near_overflow_boundary() {
        // Still representable directly; both forms must give the same instalment
        let r = monthly_rate(dec!(24));
        let direct = compute_emi(dec!(100000), dec!(24), 600).unwrap();
        let discounted = dec!(100000) * r / (Decimal::ONE - discount_factor(r, 600).unwrap());
        assert!((direct - discounted).abs() < dec!(0.000001));
    }

    #[test]
    fn test_single_month_emi() {
        // One instalment: principal plus one month of interest
        let emi = compute_emi(dec!(1200), dec!(12), 1).unwrap();
        assert!((emi - dec!(1212)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_emi_invalid_inputs() {
        assert!(compute_emi(Decimal::ZERO, dec!(8), 12).is_err());
        assert!(compute_emi(dec!(-10), dec!(8), 12).is_err());
        assert!(compute_emi(dec!(1000), dec!(-0.1), 12).is_err());
        assert!(compute_emi(dec!(1000), dec!(8), 0).is_err());
    }

    #[test]
    fn test_monthly_interest() {
        assert_eq!(monthly_interest(dec!(1200000), dec!(10)), dec!(10000));
    }

    #[test]
    fn test_emi_is_deterministic() {
        let a = compute_emi(dec!(1965994), dec!(8.15), 180).unwrap();
        let b = compute_emi(dec!(1965994), dec!(8.15), 180).unwrap();
        assert_eq!(a, b);
    }
}
