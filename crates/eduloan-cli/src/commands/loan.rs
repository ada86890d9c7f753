use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use eduloan_core::scenario::RepaymentScenario;
use eduloan_core::LoanParameters;

use crate::input;

/// Loan parameters shared by every command
#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Path to JSON file with loan parameters (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Principal disbursed before any accrual
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Outstanding balance with accrued interest capitalised
    /// (defaults to principal + accrued interest when either is given)
    #[arg(long)]
    pub outstanding: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.15)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Marginal tax bracket in percent (e.g. 30)
    #[arg(long)]
    pub tax_bracket: Option<Decimal>,

    /// Interest accrued so far
    #[arg(long)]
    pub accrued_interest: Option<Decimal>,
}

impl LoanArgs {
    /// Resolve the loan from a file, piped stdin, or flags over the reference loan.
    pub fn resolve(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if let Some(loan) = input::stdin::read_stdin()? {
            return Ok(loan);
        }

        Ok(self.to_loan())
    }

    /// Individual flags layered over the reference loan.
    pub fn to_loan(&self) -> LoanParameters {
        let mut loan = LoanParameters::default();
        if let Some(p) = self.principal {
            loan.original_principal = p;
        }
        if let Some(a) = self.accrued_interest {
            loan.accrued_interest_upfront = a;
        }
        loan.current_outstanding = match self.outstanding {
            Some(o) => o,
            None if self.principal.is_some() || self.accrued_interest.is_some() => {
                loan.original_principal + loan.accrued_interest_upfront
            }
            None => loan.current_outstanding,
        };
        if let Some(r) = self.rate {
            loan.annual_rate_percent = r;
        }
        if let Some(t) = self.tenure {
            loan.tenure_months = t;
        }
        if let Some(b) = self.tax_bracket {
            loan.tax_bracket_percent = b;
        }
        log::debug!("resolved loan from flags: {loan:?}");
        loan
    }
}

/// Scenario selector on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScenarioArg {
    /// Pay accrued interest now
    Upfront,
    /// Add accrued interest to principal
    Capitalize,
}

impl From<ScenarioArg> for RepaymentScenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Upfront => RepaymentScenario::PayUpfront,
            ScenarioArg::Capitalize => RepaymentScenario::AddToPrincipal,
        }
    }
}

/// JSON assumptions block for an envelope
pub fn loan_assumptions(loan: &LoanParameters) -> serde_json::Value {
    serde_json::to_value(loan).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn no_flags() -> LoanArgs {
        LoanArgs {
            input: None,
            principal: None,
            outstanding: None,
            rate: None,
            tenure: None,
            tax_bracket: None,
            accrued_interest: None,
        }
    }

    #[test]
    fn test_no_flags_is_reference_loan() {
        assert_eq!(no_flags().to_loan(), LoanParameters::default());
    }

    #[test]
    fn test_outstanding_follows_principal_and_accrual() {
        let mut args = no_flags();
        args.principal = Some(dec!(1000000));
        args.accrued_interest = Some(dec!(50000));
        let loan = args.to_loan();
        assert_eq!(loan.current_outstanding, dec!(1050000));
    }

    #[test]
    fn test_explicit_outstanding_wins() {
        let mut args = no_flags();
        args.principal = Some(dec!(1000000));
        args.outstanding = Some(dec!(1200000));
        args.rate = Some(dec!(9.5));
        let loan = args.to_loan();
        assert_eq!(loan.current_outstanding, dec!(1200000));
        assert_eq!(loan.annual_rate_percent, dec!(9.5));
        assert_eq!(loan.tenure_months, 180);
    }

    #[test]
    fn test_scenario_arg_mapping() {
        assert_eq!(
            RepaymentScenario::from(ScenarioArg::Capitalize),
            RepaymentScenario::AddToPrincipal
        );
    }
}
