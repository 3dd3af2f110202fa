//! Analysis request and timeframe types

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle timeframe for analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
}

impl Timeframe {
    /// Every accepted timeframe, shortest first
    pub const ALL: [Timeframe; 7] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::OneHour,
        Self::FourHours,
        Self::OneDay,
        Self::OneWeek,
    ];

    /// Wire literal for this timeframe
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| {
                let accepted: Vec<&str> = Self::ALL.iter().map(Timeframe::as_str).collect();
                Error::Validation(format!(
                    "Unknown timeframe '{s}', expected one of: {}",
                    accepted.join(", ")
                ))
            })
    }
}

/// A single analysis request
///
/// Constructed per request and discarded after the response is written.
/// Call [`AnalysisRequest::normalized`] before using it in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Trading symbol to analyze (e.g. "BTC")
    pub symbol: String,

    /// Optional natural language query for context
    #[serde(default)]
    pub query: Option<String>,

    /// Candle timeframe
    #[serde(default)]
    pub timeframe: Timeframe,

    /// Optional account address for portfolio context
    #[serde(default)]
    pub account_address: Option<String>,
}

impl AnalysisRequest {
    /// Create a request for a symbol with default settings
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            query: None,
            timeframe: Timeframe::default(),
            account_address: None,
        }
    }

    /// Set the query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the timeframe
    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    /// Set the account address
    pub fn with_account_address(mut self, address: impl Into<String>) -> Self {
        self.account_address = Some(address.into());
        self
    }

    /// Trim and upper-case the symbol, drop blank optional fields.
    ///
    /// Fails with [`Error::Validation`] when the symbol is empty.
    pub fn normalized(self) -> Result<Self> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(Error::Validation("Symbol cannot be empty.".to_string()));
        }

        Ok(Self {
            symbol,
            query: non_blank(self.query),
            timeframe: self.timeframe,
            account_address: non_blank(self.account_address),
        })
    }

    /// Query text, empty when none was given
    pub fn query_text(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("1h".parse::<Timeframe>().unwrap(), Timeframe::OneHour);
        assert_eq!(" 15m ".parse::<Timeframe>().unwrap(), Timeframe::FifteenMinutes);
        assert_eq!("1w".parse::<Timeframe>().unwrap(), Timeframe::OneWeek);

        let err = "2h".parse::<Timeframe>().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("2h"));
    }

    #[test]
    fn test_timeframe_serde() {
        let json = serde_json::to_string(&Timeframe::FourHours).unwrap();
        assert_eq!(json, "\"4h\"");

        let tf: Timeframe = serde_json::from_str("\"1d\"").unwrap();
        assert_eq!(tf, Timeframe::OneDay);
        assert_eq!(Timeframe::default(), Timeframe::OneHour);
    }

    #[test]
    fn test_normalized_uppercases_symbol() {
        let req = AnalysisRequest::new("  btc ")
            .with_query("  ")
            .with_account_address(" 0xabc ")
            .normalized()
            .unwrap();

        assert_eq!(req.symbol, "BTC");
        assert_eq!(req.query, None);
        assert_eq!(req.query_text(), "");
        assert_eq!(req.account_address.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_normalized_rejects_empty_symbol() {
        let err = AnalysisRequest::new("   ").normalized().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"symbol": "eth"}"#).unwrap();
        assert_eq!(req.symbol, "eth");
        assert_eq!(req.timeframe, Timeframe::OneHour);
        assert!(req.query.is_none());
        assert!(req.account_address.is_none());
    }
}
