//! Canned providers for development and tests

use crate::{MACRO_LABEL, SENTIMENT_LABEL, TECHNICAL_LABEL, TRADE_PLAN_LABEL};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use vibe_core::{
    Action, DataSource, Indicators, MacdReading, MacroSnapshot, MovingAverages, Result,
    SentimentSnapshot, SourceQuery, TechnicalSnapshot, TradePlan, WhaleActivity,
};

/// Technical indicators with a fixed bullish reading
#[derive(Debug, Clone, Default)]
pub struct MockTechnicalSource {
    latency: Option<Duration>,
}

impl MockTechnicalSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every fetch by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The payload every fetch returns
    pub fn snapshot() -> TechnicalSnapshot {
        TechnicalSnapshot {
            indicators: Indicators {
                rsi: Some(65.0),
                macd: Some(MacdReading {
                    status: "bullish_crossover".to_string(),
                }),
                moving_averages: Some(MovingAverages {
                    alignment: "aligned_uptrend".to_string(),
                }),
            },
            pattern: Some("ascending_triangle".to_string()),
            strength: Some(0.78),
            trend: Some("uptrend".to_string()),
        }
    }
}

#[async_trait]
impl DataSource for MockTechnicalSource {
    type Output = TechnicalSnapshot;

    fn name(&self) -> &str {
        TECHNICAL_LABEL
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<TechnicalSnapshot> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        debug!(symbol = %query.symbol, timeframe = %query.timeframe, "Serving mock technical data");
        Ok(Self::snapshot())
    }
}

/// Market sentiment with a fixed bullish reading
#[derive(Debug, Clone, Default)]
pub struct MockSentimentSource {
    latency: Option<Duration>,
}

impl MockSentimentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every fetch by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The payload every fetch returns
    pub fn snapshot() -> SentimentSnapshot {
        SentimentSnapshot {
            market_sentiment: Some("bullish".to_string()),
            narrative: Some("Fed pivot expectations".to_string()),
            confidence: Some(0.72),
            whale_activity: Some(WhaleActivity {
                large_buys_24h: 45,
                net_flow: "bullish".to_string(),
            }),
        }
    }
}

#[async_trait]
impl DataSource for MockSentimentSource {
    type Output = SentimentSnapshot;

    fn name(&self) -> &str {
        SENTIMENT_LABEL
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<SentimentSnapshot> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        debug!(symbol = %query.symbol, "Serving mock sentiment data");
        Ok(Self::snapshot())
    }
}

/// Macro backdrop with a fixed risk-on reading
#[derive(Debug, Clone, Default)]
pub struct MockMacroSource {
    latency: Option<Duration>,
}

impl MockMacroSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn snapshot() -> MacroSnapshot {
        MacroSnapshot {
            environment: Some("risk_on".to_string()),
            key_events: vec!["FOMC Meeting".to_string(), "CPI Release".to_string()],
            impact: Some("high".to_string()),
            fed_policy: Some("Accommodative".to_string()),
        }
    }
}

#[async_trait]
impl DataSource for MockMacroSource {
    type Output = MacroSnapshot;

    fn name(&self) -> &str {
        MACRO_LABEL
    }

    async fn fetch(&self, _query: &SourceQuery) -> Result<MacroSnapshot> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(Self::snapshot())
    }
}

/// Long trade plan with fixed levels
#[derive(Debug, Clone, Default)]
pub struct MockTradePlanSource {
    latency: Option<Duration>,
}

impl MockTradePlanSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn plan() -> TradePlan {
        TradePlan {
            action: Some(Action::Buy),
            entry_price: Some(43_100.0),
            stop_loss: Some(42_200.0),
            take_profit: Some(45_000.0),
            position_size: Some("2.5%".to_string()),
            confidence: Some(0.81),
            reasoning: Some("Technical breakout confirmed by macro tailwinds".to_string()),
        }
    }
}

#[async_trait]
impl DataSource for MockTradePlanSource {
    type Output = TradePlan;

    fn name(&self) -> &str {
        TRADE_PLAN_LABEL
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<TradePlan> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        debug!(symbol = %query.symbol, "Serving mock trade plan");
        Ok(Self::plan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibe_core::Timeframe;

    #[tokio::test]
    async fn test_mock_payloads() {
        let query = SourceQuery::new("BTC", Timeframe::OneHour);

        let technical = MockTechnicalSource::new().fetch(&query).await.unwrap();
        assert_eq!(technical.strength, Some(0.78));
        assert_eq!(technical.trend.as_deref(), Some("uptrend"));
        assert_eq!(technical.indicators.rsi, Some(65.0));

        let sentiment = MockSentimentSource::new().fetch(&query).await.unwrap();
        assert_eq!(sentiment.confidence, Some(0.72));
        assert_eq!(sentiment.whale_activity.unwrap().large_buys_24h, 45);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let source = MockSentimentSource::new().with_latency(Duration::from_secs(3));
        let started = tokio::time::Instant::now();

        source
            .fetch(&SourceQuery::new("ETH", Timeframe::OneDay))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[test]
    fn test_labels() {
        assert_eq!(MockTechnicalSource::new().name(), "TAAPI");
        assert_eq!(MockSentimentSource::new().name(), "AIXBT");
        assert_eq!(MockMacroSource::new().name(), "Macro");
        assert_eq!(MockTradePlanSource::new().name(), "Dreams LLM");
    }

    #[tokio::test]
    async fn test_enrichment_payloads() {
        let query = SourceQuery::new("BTC", Timeframe::OneHour);

        let backdrop = MockMacroSource::new().fetch(&query).await.unwrap();
        assert_eq!(backdrop.environment.as_deref(), Some("risk_on"));
        assert_eq!(backdrop.key_events.len(), 2);

        let plan = MockTradePlanSource::new().fetch(&query).await.unwrap();
        assert_eq!(plan.action, Some(Action::Buy));
        assert_eq!(plan.stop_loss, Some(42_200.0));
    }
}
