//! 402 payment descriptor

use crate::{CURRENCY, PaymentError, Result};
use serde::{Deserialize, Serialize};

/// What a paid endpoint demands before serving a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequirement {
    /// Price in base units, as a decimal string
    pub amount: String,
    pub currency: String,
    pub network: String,
    pub recipient: String,
    #[serde(default)]
    pub description: String,
}

impl PaymentRequirement {
    /// USDC requirement for `amount` base units
    pub fn usdc(
        amount: u64,
        network: impl Into<String>,
        recipient: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.to_string(),
            currency: CURRENCY.to_string(),
            network: network.into(),
            recipient: recipient.into(),
            description: description.into(),
        }
    }

    /// Demanded amount as an integer
    pub fn amount_units(&self) -> Result<u64> {
        self.amount.trim().parse().map_err(|_| {
            PaymentError::InvalidRequirement(format!("amount '{}' is not an integer", self.amount))
        })
    }
}

/// Body of a 402 response
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentChallenge {
    pub payment_required: PaymentRequirement,
}
