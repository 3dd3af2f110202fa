//! Analysis report returned to callers

use crate::{MacroSnapshot, SentimentSnapshot, TechnicalSnapshot, Timeframe};
use serde::{Deserialize, Serialize};

/// Recommended trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

/// Synthesized recommendation
///
/// Price levels are present only when a trade plan agreeing with `action`
/// was available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    pub confidence: f64,
    pub reasoning: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_size: Option<String>,
}

impl Recommendation {
    /// Recommendation without price levels
    pub fn new(action: Action, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            confidence,
            reasoning: reasoning.into(),
            entry_price: None,
            stop_loss: None,
            take_profit: None,
            position_size: None,
        }
    }
}

/// Source payloads plus the recommendation built from them
///
/// Absent technical or sentiment payloads serialize as `null`. The macro
/// block is omitted when no macro source is configured or it failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub technical: Option<TechnicalSnapshot>,
    pub sentiment: Option<SentimentSnapshot>,
    #[serde(rename = "macro", default, skip_serializing_if = "Option::is_none")]
    pub macro_environment: Option<MacroSnapshot>,
    pub recommendation: Recommendation,
}

/// Portfolio placeholder echoed back when an account address is supplied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub address: String,
    pub status: String,
}

impl Portfolio {
    /// Portfolio lookups are not performed; the address is reported as pending
    pub fn pending(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            status: "pending".to_string(),
        }
    }
}

/// Billing and timing metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Labels of the sources that returned data, technical first
    pub sources_called: Vec<String>,

    /// Maximum upstream spend for this request, in base units
    pub total_cost: String,

    pub processing_time_ms: u64,

    pub request_id: String,

    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

/// Full response body for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub analysis: Analysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<Portfolio>,
    pub metadata: AnalysisMetadata,
}
