use thiserror::Error;

#[derive(Debug, Error)]
pub enum EduLoanError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl EduLoanError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        EduLoanError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EduLoanError {
    fn from(e: serde_json::Error) -> Self {
        EduLoanError::SerializationError(e.to_string())
    }
}
