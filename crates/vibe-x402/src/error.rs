//! Error types for x402 payments

use thiserror::Error;

/// Result type alias for vibe-x402
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors raised while paying for or decoding an x402 exchange
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Upstream asked for payment but no signing key is configured
    #[error("Payment required by {endpoint} but no signing key is configured")]
    PaymentUnavailable { endpoint: String },

    /// Upstream asked for more than the caller allowed
    #[error("Upstream demands {demanded} but the budget is {budget}")]
    BudgetExceeded { demanded: u64, budget: u64 },

    /// 402 body without a usable payment descriptor
    #[error("Invalid payment requirement: {0}")]
    InvalidRequirement(String),

    /// Malformed X-Payment header
    #[error("Invalid payment header: {0}")]
    InvalidHeader(String),

    /// Upstream returned a non-success status
    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body could not be deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<PaymentError> for vibe_core::Error {
    fn from(err: PaymentError) -> Self {
        vibe_core::Error::Generic(err.to_string())
    }
}
