//! End-to-end analysis service

use crate::config::EngineConfig;
use crate::fanout::fan_out;
use crate::routing::LlmRouter;
use crate::synth::{apply_trade_plan, synthesize};
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;
use vibe_core::{
    Analysis, AnalysisMetadata, AnalysisReport, AnalysisRequest, Portfolio, Result, SourceQuery,
};
use vibe_sources::SourceSet;

/// The analysis pipeline
///
/// Immutable once built; share it behind an `Arc`.
#[derive(Clone)]
pub struct AnalysisService {
    config: EngineConfig,
    router: LlmRouter,
    sources: SourceSet,
}

impl AnalysisService {
    pub fn new(config: EngineConfig, router: LlmRouter, sources: SourceSet) -> Self {
        Self {
            config,
            router,
            sources,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one request
    ///
    /// Only validation errors are returned. Routing or source failures
    /// degrade the report instead.
    #[instrument(
        skip(self, request),
        fields(symbol = %request.symbol, timeframe = %request.timeframe)
    )]
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisReport> {
        let started = Instant::now();
        let request = request.normalized()?;
        let request_id = Uuid::new_v4().to_string();

        let budget = self.config.budget;
        info!(
            %request_id,
            max_spend = budget.max_spend,
            per_source = budget.per_source,
            "Starting analysis"
        );

        let decision = self
            .router
            .route(&request.symbol, request.query_text())
            .await;

        let query = SourceQuery::new(&request.symbol, request.timeframe)
            .with_budget(budget.per_source);
        let fanned = fan_out(&self.sources, decision, &query, self.config.source_timeout).await;

        let technical = fanned.technical.into_option();
        let sentiment = fanned.sentiment.into_option();
        let trade_plan = fanned.trade_plan.into_option();
        let recommendation = apply_trade_plan(
            synthesize(technical.as_ref(), sentiment.as_ref()),
            trade_plan.as_ref(),
        );

        let processing_time_ms =
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            %request_id,
            action = ?recommendation.action,
            confidence = recommendation.confidence,
            processing_time_ms,
            "Analysis complete"
        );

        Ok(AnalysisReport {
            portfolio: request.account_address.as_deref().map(Portfolio::pending),
            symbol: request.symbol,
            timeframe: request.timeframe,
            analysis: Analysis {
                technical,
                sentiment,
                macro_environment: fanned.macro_environment.into_option(),
                recommendation,
            },
            metadata: AnalysisMetadata {
                sources_called: fanned.sources_called,
                total_cost: budget.max_spend.to_string(),
                processing_time_ms,
                request_id,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        })
    }
}
