//! Upstream data source trait

use crate::{MacroSnapshot, Result, SentimentSnapshot, TechnicalSnapshot, Timeframe, TradePlan};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// What a source is asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceQuery {
    /// Normalized (upper-case) symbol
    pub symbol: String,

    /// Candle timeframe
    pub timeframe: Timeframe,

    /// Maximum the source may spend on upstream payment, in base units
    #[serde(skip)]
    pub budget: u64,
}

impl SourceQuery {
    /// Create a query with no spend allowance
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            budget: 0,
        }
    }

    /// Set the spend allowance
    pub fn with_budget(mut self, budget: u64) -> Self {
        self.budget = budget;
        self
    }
}

/// Any provider that can fetch a payload for a symbol
///
/// The pipeline treats every call as atomic: it either yields the whole
/// payload or fails. Mock and paid providers implement the same trait, so
/// swapping them is a configuration choice.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Payload type produced by this source
    type Output: Send;

    /// Label reported in `sources_called` (e.g. "TAAPI")
    fn name(&self) -> &str;

    /// Fetch the payload for a query
    async fn fetch(&self, query: &SourceQuery) -> Result<Self::Output>;
}

/// Shared handle to a technical-indicator source
pub type TechnicalSource = Arc<dyn DataSource<Output = TechnicalSnapshot>>;

/// Shared handle to a sentiment source
pub type SentimentSource = Arc<dyn DataSource<Output = SentimentSnapshot>>;

/// Shared handle to a macro-environment source
pub type MacroSource = Arc<dyn DataSource<Output = MacroSnapshot>>;

/// Shared handle to a trade-plan source
pub type TradePlanSource = Arc<dyn DataSource<Output = TradePlan>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait]
    impl DataSource for Fixed {
        type Output = TechnicalSnapshot;

        fn name(&self) -> &str {
            "FIXED"
        }

        async fn fetch(&self, query: &SourceQuery) -> Result<TechnicalSnapshot> {
            Ok(TechnicalSnapshot {
                pattern: Some(query.symbol.clone()),
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let source: TechnicalSource = Arc::new(Fixed);
        let query = SourceQuery::new("BTC", Timeframe::OneDay).with_budget(30_000);

        let snapshot = source.fetch(&query).await.unwrap();
        assert_eq!(source.name(), "FIXED");
        assert_eq!(snapshot.pattern.as_deref(), Some("BTC"));
    }

    #[test]
    fn test_query_serialization_omits_budget() {
        let query = SourceQuery::new("ETH", Timeframe::FourHours).with_budget(10);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"symbol": "ETH", "timeframe": "4h"}));
    }
}
