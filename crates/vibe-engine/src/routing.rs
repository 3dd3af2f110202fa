//! LLM-backed source routing
//!
//! Asks a model which upstream sources are worth paying for. Any failure
//! falls back to calling everything.

use crate::race::{SourceOutcome, call_with_timeout};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use vibe_core::Error;
use vibe_llm::{CompletionRequest, LLMProvider, Message, parse_json_reply};

const ROUTING_SYSTEM_PROMPT: &str = "\
You route cryptocurrency trading analysis requests to data sources. Available sources: \
call_taapi (technical indicators: RSI, MACD, moving averages, chart patterns), \
call_aixbt (market sentiment, narratives, whale activity) and \
call_dreams (trade plan with entry, stop loss and take profit levels). \
Reply with a single JSON object of the form \
{\"call_taapi\": true|false, \"call_aixbt\": true|false, \"call_dreams\": true|false} \
and nothing else.";

/// Which sources to call for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    #[serde(alias = "call_taapi", default = "default_true")]
    pub call_technical: bool,

    #[serde(alias = "call_aixbt", default = "default_true")]
    pub call_sentiment: bool,

    /// Only consulted when a trade-plan source is configured
    #[serde(alias = "call_dreams", default = "default_true")]
    pub call_trade_plan: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RoutingDecision {
    fn default() -> Self {
        Self {
            call_technical: true,
            call_sentiment: true,
            call_trade_plan: true,
        }
    }
}

/// Parse a model reply into a decision
///
/// Accepts fenced or inline JSON. `None` when no decision can be read.
pub fn parse_decision(reply: &str) -> Option<RoutingDecision> {
    parse_json_reply(reply)
}

/// Routing classifier over an optional LLM provider
#[derive(Clone)]
pub struct LlmRouter {
    provider: Option<Arc<dyn LLMProvider>>,
    model: String,
    timeout: Duration,
}

impl LlmRouter {
    /// Router backed by `provider`
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider: Some(provider),
            model: model.into(),
            timeout,
        }
    }

    /// Router that always returns the default decision
    pub fn disabled() -> Self {
        Self {
            provider: None,
            model: String::new(),
            timeout: Duration::ZERO,
        }
    }

    /// Whether a model is consulted
    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Decide which sources to call for `symbol`
    ///
    /// Single attempt under the routing deadline.
    pub async fn route(&self, symbol: &str, query: &str) -> RoutingDecision {
        let Some(provider) = &self.provider else {
            debug!("No routing model configured, calling all sources");
            return RoutingDecision::default();
        };

        let request = CompletionRequest::builder(&self.model)
            .system(ROUTING_SYSTEM_PROMPT)
            .add_message(Message::user(format!(
                "Symbol: {symbol}\nQuery: {}",
                if query.is_empty() { "(none)" } else { query }
            )))
            .max_tokens(64)
            .temperature(0.0)
            .build();

        let outcome = call_with_timeout("routing", self.timeout, async {
            provider
                .complete(request)
                .await
                .map_err(|e| Error::source_failed("routing", e))
        })
        .await;

        let SourceOutcome::Data(response) = outcome else {
            return RoutingDecision::default();
        };

        match parse_decision(response.message.text()) {
            Some(decision) => {
                info!(
                    call_technical = decision.call_technical,
                    call_sentiment = decision.call_sentiment,
                    call_trade_plan = decision.call_trade_plan,
                    "Routing decision"
                );
                decision
            }
            None => {
                warn!("Routing reply had no usable decision, calling all sources");
                RoutingDecision::default()
            }
        }
    }
}
