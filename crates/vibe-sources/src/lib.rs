//! Upstream data sources
//!
//! Every provider implements [`vibe_core::DataSource`]. Which
//! implementation backs each slot is decided by [`SourceSettings`]:
//! a configured endpoint URL selects the paid [`X402Source`], otherwise
//! the canned mock is used. The macro and trade-plan slots are optional
//! and stay empty unless enabled.

pub mod mock;
pub mod registry;
pub mod x402;

pub use mock::{
    MockMacroSource, MockSentimentSource, MockTechnicalSource, MockTradePlanSource,
};
pub use registry::{SourceSet, SourceSettings};
pub use x402::X402Source;

/// Label of the technical-indicator source
pub const TECHNICAL_LABEL: &str = "TAAPI";

/// Label of the sentiment source
pub const SENTIMENT_LABEL: &str = "AIXBT";

/// Label of the macro-environment source
pub const MACRO_LABEL: &str = "Macro";

/// Label of the LLM trade-plan source
pub const TRADE_PLAN_LABEL: &str = "Dreams LLM";
