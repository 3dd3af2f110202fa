//! Spend budget derived from the entry price

use serde::{Deserialize, Serialize};

/// Share of the entry price available for upstream spend, in percent
const SPEND_PERCENT: u64 = 90;

/// Number of paid source slots sharing the spend: technical, sentiment
/// and trade plan
const SOURCE_SHARES: u64 = 3;

/// How much of a request's price may be passed on to upstream providers
///
/// Everything is integer base units (USDC has 6 decimals, so 100000 is $0.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendBudget {
    /// Price charged to the caller
    pub price: u64,
    /// 90% of the price, floored
    pub max_spend: u64,
    /// A third of `max_spend`, floored
    pub per_source: u64,
}

impl SpendBudget {
    /// Split an entry price
    pub fn from_price(price: u64) -> Self {
        // 90% of a u64 always fits back into a u64
        let max_spend = (u128::from(price) * u128::from(SPEND_PERCENT) / 100) as u64;
        Self {
            price,
            max_spend,
            per_source: max_spend / SOURCE_SHARES,
        }
    }
}
