//! Payloads returned by the upstream data sources
//!
//! Fields are optional because real providers are free to omit them; the
//! synthesizer falls back to neutral defaults for anything missing.

use crate::Action;
use serde::{Deserialize, Serialize};

/// MACD reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    /// e.g. "bullish_crossover"
    pub status: String,
}

/// Moving average alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    /// e.g. "aligned_uptrend"
    pub alignment: String,
}

/// Indicator block of a technical snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdReading>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_averages: Option<MovingAverages>,
}

/// Result of the technical-indicator source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    #[serde(default)]
    pub indicators: Indicators,

    /// Chart pattern, e.g. "ascending_triangle"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Signal strength, nominally 0.0-1.0 (not clamped)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,

    /// Trend label, e.g. "uptrend"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

/// On-chain whale flow summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhaleActivity {
    pub large_buys_24h: u32,
    pub net_flow: String,
}

/// Result of the sentiment source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSnapshot {
    /// e.g. "bullish"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_sentiment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,

    /// Source confidence, nominally 0.0-1.0 (not clamped)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whale_activity: Option<WhaleActivity>,
}

/// Result of the macro-environment source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    /// e.g. "risk_on"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_events: Vec<String>,

    /// Expected market impact, e.g. "high"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fed_policy: Option<String>,
}

/// Trade plan proposed by the LLM planning source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    /// Direction the plan was written for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,

    /// Share of the portfolio, e.g. "2.5%"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}
