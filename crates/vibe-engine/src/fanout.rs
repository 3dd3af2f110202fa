//! Parallel fan-out to the selected sources

use crate::race::{SourceOutcome, call_with_timeout};
use crate::routing::RoutingDecision;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vibe_core::{
    DataSource, MacroSnapshot, SentimentSnapshot, SourceQuery, TechnicalSnapshot, TradePlan,
};
use vibe_sources::SourceSet;

/// Settled outcomes of one fan-out
#[derive(Debug, Clone, PartialEq)]
pub struct FanOut {
    pub technical: SourceOutcome<TechnicalSnapshot>,
    pub sentiment: SourceOutcome<SentimentSnapshot>,
    pub macro_environment: SourceOutcome<MacroSnapshot>,
    pub trade_plan: SourceOutcome<TradePlan>,
    /// Labels of the sources that returned data, in slot order
    pub sources_called: Vec<String>,
}

async fn call_slot<T: Send>(
    source: Option<&Arc<dyn DataSource<Output = T>>>,
    query: &SourceQuery,
    timeout: Duration,
) -> SourceOutcome<T> {
    match source {
        Some(source) => call_with_timeout(source.name(), timeout, source.fetch(query)).await,
        None => SourceOutcome::Skipped,
    }
}

/// Call the selected sources concurrently and wait for all to settle
///
/// Each call is raced against `timeout` on its own, so the whole fan-out
/// takes at most one timeout. Unselected or unconfigured sources are never
/// invoked. The macro source is not routed; it runs whenever configured.
pub async fn fan_out(
    sources: &SourceSet,
    decision: RoutingDecision,
    query: &SourceQuery,
    timeout: Duration,
) -> FanOut {
    let technical = decision.call_technical.then_some(&sources.technical);
    let sentiment = decision.call_sentiment.then_some(&sources.sentiment);
    let trade_plan = sources
        .trade_plan
        .as_ref()
        .filter(|_| decision.call_trade_plan);

    let (technical, sentiment, macro_environment, trade_plan) = tokio::join!(
        call_slot(technical, query, timeout),
        call_slot(sentiment, query, timeout),
        call_slot(sources.macro_environment.as_ref(), query, timeout),
        call_slot(trade_plan, query, timeout),
    );

    let mut sources_called = Vec::with_capacity(4);
    if technical.is_data() {
        sources_called.push(sources.technical.name().to_string());
    }
    if sentiment.is_data() {
        sources_called.push(sources.sentiment.name().to_string());
    }
    if let (true, Some(source)) = (macro_environment.is_data(), &sources.macro_environment) {
        sources_called.push(source.name().to_string());
    }
    if let (true, Some(source)) = (trade_plan.is_data(), &sources.trade_plan) {
        sources_called.push(source.name().to_string());
    }

    info!(symbol = %query.symbol, ?sources_called, "Fan-out settled");

    FanOut {
        technical,
        sentiment,
        macro_environment,
        trade_plan,
        sources_called,
    }
}
