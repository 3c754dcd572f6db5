use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanEngineError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Non-amortizing loan: payment {offered_payment} does not cover first-period interest; \
         minimum required payment is {minimum_payment}"
    )]
    NonAmortizing {
        offered_payment: Decimal,
        minimum_payment: Decimal,
    },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanEngineError {
    fn from(e: serde_json::Error) -> Self {
        LoanEngineError::SerializationError(e.to_string())
    }
}
