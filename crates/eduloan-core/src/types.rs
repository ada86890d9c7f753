use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages as quoted to borrowers (8.15 = 8.15%). Never as decimals.
pub type Percent = Decimal;

/// The single loan being analysed. Every entry point reads from this value
/// and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Principal disbursed before any accrual
    pub original_principal: Money,
    /// Principal if accrued interest is capitalised instead of paid upfront
    pub current_outstanding: Money,
    /// Nominal annual interest rate in percent
    pub annual_rate_percent: Percent,
    /// Number of equal monthly instalments
    pub tenure_months: u32,
    /// Marginal tax rate applied to deductible interest, in percent
    pub tax_bracket_percent: Percent,
    /// Interest accrued so far, either paid now or added to principal
    pub accrued_interest_upfront: Money,
}

impl Default for LoanParameters {
    fn default() -> Self {
        LoanParameters {
            original_principal: dec!(1775000),
            current_outstanding: dec!(1965994),
            annual_rate_percent: dec!(8.15),
            tenure_months: 180,
            tax_bracket_percent: dec!(30),
            accrued_interest_upfront: dec!(190994),
        }
    }
}

impl LoanParameters {
    /// Gap between the capitalised balance and principal plus accrued
    /// interest. Zero for a consistent loan.
    pub fn capitalisation_gap(&self) -> Money {
        self.current_outstanding - (self.original_principal + self.accrued_interest_upfront)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation. Carries no timing so identical inputs
/// serialise to identical envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loan_is_consistent() {
        let loan = LoanParameters::default();
        assert_eq!(loan.capitalisation_gap(), Decimal::ZERO);
    }

    #[test]
    fn test_loan_deserialises_from_numbers_and_strings() {
        let json = serde_json::json!({
            "original_principal": 1000,
            "current_outstanding": "1100",
            "annual_rate_percent": 9.5,
            "tenure_months": 60,
            "tax_bracket_percent": "20",
            "accrued_interest_upfront": 100
        });
        let loan: LoanParameters = serde_json::from_value(json).unwrap();
        assert_eq!(loan.annual_rate_percent, dec!(9.5));
        assert_eq!(loan.current_outstanding, dec!(1100));
        assert_eq!(loan.tenure_months, 60);
    }
}
