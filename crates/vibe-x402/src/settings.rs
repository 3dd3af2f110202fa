//! Payment settings loaded from the environment

use crate::{PaymentRequirement, SpendBudget};
use std::fmt;
use vibe_utils::{env_or, env_string, first_env};

/// Default facilitator that settles payments
pub const DEFAULT_FACILITATOR_URL: &str = "https://facilitator.daydreams.systems";

/// Default recipient of incoming payments
pub const DEFAULT_PAY_TO: &str = "0xb308ed39d67D0d4BAe5BC2FAEF60c66BBb6AE429";

/// Default settlement network
pub const DEFAULT_NETWORK: &str = "base";

/// Price of one analysis, in USDC base units ($0.10)
pub const DEFAULT_PRICE: u64 = 100_000;

/// How this service charges and pays
#[derive(Clone)]
pub struct PaymentSettings {
    /// Price charged per analysis, in base units
    pub price: u64,
    /// Address incoming payments go to
    pub pay_to: String,
    /// Settlement network (e.g. "base", "base-sepolia")
    pub network: String,
    /// Facilitator endpoint advertised to callers
    pub facilitator_url: String,
    /// Key used to pay upstream endpoints; paying is disabled without it
    pub private_key: Option<String>,
}

impl PaymentSettings {
    /// Read `PAY_TO` / `X402_RECIPIENT_ADDRESS`, `NETWORK` / `X402_NETWORK`,
    /// `FACILITATOR_URL` and `PRIVATE_KEY`
    pub fn from_env() -> Self {
        Self {
            price: DEFAULT_PRICE,
            pay_to: first_env(&["PAY_TO", "X402_RECIPIENT_ADDRESS"])
                .unwrap_or_else(|| DEFAULT_PAY_TO.to_string()),
            network: first_env(&["NETWORK", "X402_NETWORK"])
                .unwrap_or_else(|| DEFAULT_NETWORK.to_string()),
            facilitator_url: env_or("FACILITATOR_URL", DEFAULT_FACILITATOR_URL),
            private_key: env_string("PRIVATE_KEY"),
        }
    }

    /// Descriptor returned with a 402
    pub fn requirement(&self, description: impl Into<String>) -> PaymentRequirement {
        PaymentRequirement::usdc(self.price, &self.network, &self.pay_to, description)
    }

    /// Spend budget for one paid request
    pub fn budget(&self) -> SpendBudget {
        SpendBudget::from_price(self.price)
    }

    /// Whether upstream x402 endpoints can be paid
    pub fn can_pay(&self) -> bool {
        self.private_key.is_some()
    }
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            price: DEFAULT_PRICE,
            pay_to: DEFAULT_PAY_TO.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            facilitator_url: DEFAULT_FACILITATOR_URL.to_string(),
            private_key: None,
        }
    }
}

impl fmt::Debug for PaymentSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentSettings")
            .field("price", &self.price)
            .field("pay_to", &self.pay_to)
            .field("network", &self.network)
            .field("facilitator_url", &self.facilitator_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
