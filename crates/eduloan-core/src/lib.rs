pub mod emi;
pub mod error;
pub mod scenario;
pub mod types;
pub mod validation;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "cash_flow")]
pub mod cash_flow;

#[cfg(feature = "report")]
pub mod report;

pub use emi::compute_emi;
pub use error::EduLoanError;
pub use types::*;

#[cfg(feature = "amortization")]
pub use amortization::generate_schedule;

#[cfg(feature = "sensitivity")]
pub use sensitivity::{rate_sensitivity, tenure_sensitivity};

#[cfg(feature = "tax")]
pub use tax::project_tax_benefits;

#[cfg(feature = "cash_flow")]
pub use cash_flow::analyze_cash_flow;

/// Standard result type for all education-loan operations
pub type EduLoanResult<T> = Result<T, EduLoanError>;
