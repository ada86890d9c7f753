use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::EduLoanError;
use crate::types::{LoanParameters, Money, Percent};
use crate::EduLoanResult;

pub(crate) fn require_positive_money(field: &str, value: Money) -> EduLoanResult<()> {
    if value <= Decimal::ZERO {
        return Err(EduLoanError::invalid(field, "Must be positive"));
    }
    Ok(())
}

pub(crate) fn require_positive_tenure(field: &str, months: u32) -> EduLoanResult<()> {
    if months == 0 {
        return Err(EduLoanError::invalid(field, "Tenure must be at least 1 month"));
    }
    Ok(())
}

pub(crate) fn require_non_negative_rate(field: &str, rate: Percent) -> EduLoanResult<()> {
    if rate < Decimal::ZERO {
        return Err(EduLoanError::invalid(
            field,
            format!("Interest rate cannot be negative (got {rate}%)"),
        ));
    }
    Ok(())
}

pub(crate) fn require_tax_bracket(field: &str, bracket: Percent) -> EduLoanResult<()> {
    if bracket < Decimal::ZERO || bracket > dec!(100) {
        return Err(EduLoanError::invalid(
            field,
            format!("Tax bracket must be between 0% and 100% (got {bracket}%)"),
        ));
    }
    Ok(())
}

/// Check every field of a loan before any computation starts.
pub fn validate_loan(loan: &LoanParameters) -> EduLoanResult<()> {
    require_positive_money("original_principal", loan.original_principal)?;
    require_positive_money("current_outstanding", loan.current_outstanding)?;
    require_non_negative_rate("annual_rate_percent", loan.annual_rate_percent)?;
    require_positive_tenure("tenure_months", loan.tenure_months)?;
    require_tax_bracket("tax_bracket_percent", loan.tax_bracket_percent)?;
    if loan.accrued_interest_upfront < Decimal::ZERO {
        return Err(EduLoanError::invalid(
            "accrued_interest_upfront",
            "Accrued interest cannot be negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loan_passes() {
        assert!(validate_loan(&LoanParameters::default()).is_ok());
    }

    #[test]
    fn test_rejects_each_bad_field() {
        let base = LoanParameters::default();

        let mut loan = base.clone();
        loan.original_principal = Decimal::ZERO;
        assert!(validate_loan(&loan).is_err());

        let mut loan = base.clone();
        loan.current_outstanding = dec!(-1);
        assert!(validate_loan(&loan).is_err());

        let mut loan = base.clone();
        loan.annual_rate_percent = dec!(-0.01);
        assert!(validate_loan(&loan).is_err());

        let mut loan = base.clone();
        loan.tenure_months = 0;
        assert!(validate_loan(&loan).is_err());

        let mut loan = base.clone();
        loan.tax_bracket_percent = dec!(-5);
        assert!(validate_loan(&loan).is_err());

        let mut loan = base.clone();
        loan.tax_bracket_percent = dec!(100.5);
        assert!(validate_loan(&loan).is_err());

        let mut loan = base;
        loan.accrued_interest_upfront = dec!(-1);
        assert!(validate_loan(&loan).is_err());
    }

    #[test]
    fn test_zero_rate_and_zero_accrual_allowed() {
        let mut loan = LoanParameters::default();
        loan.annual_rate_percent = Decimal::ZERO;
        loan.accrued_interest_upfront = Decimal::ZERO;
        assert!(validate_loan(&loan).is_ok());
    }

    #[test]
    fn test_error_names_field() {
        let mut loan = LoanParameters::default();
        loan.tenure_months = 0;
        match validate_loan(&loan) {
            Err(EduLoanError::InvalidParameter { field, .. }) => {
                assert_eq!(field, "tenure_months")
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}
