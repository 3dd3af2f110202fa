//! Core abstractions for vibe-trade
//!
//! This crate defines the request-scoped value types that flow through the
//! analysis pipeline, the `DataSource` trait every upstream provider
//! implements, and the shared error type.

pub mod error;
pub mod report;
pub mod request;
pub mod snapshot;
pub mod source;

pub use error::{Error, Result};
pub use report::{Action, Analysis, AnalysisMetadata, AnalysisReport, Portfolio, Recommendation};
pub use request::{AnalysisRequest, Timeframe};
pub use snapshot::{
    Indicators, MacdReading, MacroSnapshot, MovingAverages, SentimentSnapshot, TechnicalSnapshot,
    TradePlan, WhaleActivity,
};
pub use source::{
    DataSource, MacroSource, SentimentSource, SourceQuery, TechnicalSource, TradePlanSource,
};
