//! Source selection from configuration

use crate::{
    MACRO_LABEL, MockMacroSource, MockSentimentSource, MockTechnicalSource, MockTradePlanSource,
    SENTIMENT_LABEL, TECHNICAL_LABEL, TRADE_PLAN_LABEL, X402Source,
};
use std::sync::Arc;
use tracing::info;
use vibe_core::{
    MacroSource, SentimentSnapshot, SentimentSource, TechnicalSnapshot, TechnicalSource,
    TradePlan, TradePlanSource,
};
use vibe_utils::{EnvError, env_parse, env_string};
use vibe_x402::X402Client;

/// Upstream endpoints; `None` selects the mock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSettings {
    pub technical_url: Option<String>,
    pub sentiment_url: Option<String>,

    /// Attach the macro-environment source
    pub macro_enabled: bool,

    /// Paid trade-plan endpoint
    pub trade_plan_url: Option<String>,

    /// Attach the mock trade-plan source when no endpoint is set
    pub trade_plan_enabled: bool,
}

impl SourceSettings {
    /// Read `TAAPI_URL`, `AIXBT_URL`, `MACRO_ENABLED`, `DREAMS_URL` and
    /// `DREAMS_ENABLED`
    pub fn from_env() -> Result<Self, EnvError> {
        Ok(Self {
            technical_url: env_string("TAAPI_URL"),
            sentiment_url: env_string("AIXBT_URL"),
            macro_enabled: env_parse("MACRO_ENABLED")?.unwrap_or(false),
            trade_plan_url: env_string("DREAMS_URL"),
            trade_plan_enabled: env_parse("DREAMS_ENABLED")?.unwrap_or(false),
        })
    }
}

/// The sources the pipeline fans out to
///
/// Technical and sentiment are always present. The macro and trade-plan
/// slots are optional enrichments.
#[derive(Clone)]
pub struct SourceSet {
    pub technical: TechnicalSource,
    pub sentiment: SentimentSource,
    pub macro_environment: Option<MacroSource>,
    pub trade_plan: Option<TradePlanSource>,
}

impl SourceSet {
    pub fn new(technical: TechnicalSource, sentiment: SentimentSource) -> Self {
        Self {
            technical,
            sentiment,
            macro_environment: None,
            trade_plan: None,
        }
    }

    /// Attach a macro-environment source
    pub fn with_macro(mut self, source: MacroSource) -> Self {
        self.macro_environment = Some(source);
        self
    }

    /// Attach a trade-plan source
    pub fn with_trade_plan(mut self, source: TradePlanSource) -> Self {
        self.trade_plan = Some(source);
        self
    }

    /// Technical and sentiment slots backed by the canned mocks
    pub fn mock() -> Self {
        Self::new(
            Arc::new(MockTechnicalSource::new()),
            Arc::new(MockSentimentSource::new()),
        )
    }

    /// Pick an implementation per slot
    pub fn from_settings(settings: &SourceSettings, client: &Arc<X402Client>) -> Self {
        let technical: TechnicalSource = match &settings.technical_url {
            Some(url) => {
                info!(source = TECHNICAL_LABEL, %url, "Using x402 source");
                Arc::new(X402Source::<TechnicalSnapshot>::new(
                    TECHNICAL_LABEL,
                    url,
                    Arc::clone(client),
                ))
            }
            None => {
                info!(source = TECHNICAL_LABEL, "Using mock source");
                Arc::new(MockTechnicalSource::new())
            }
        };

        let sentiment: SentimentSource = match &settings.sentiment_url {
            Some(url) => {
                info!(source = SENTIMENT_LABEL, %url, "Using x402 source");
                Arc::new(X402Source::<SentimentSnapshot>::new(
                    SENTIMENT_LABEL,
                    url,
                    Arc::clone(client),
                ))
            }
            None => {
                info!(source = SENTIMENT_LABEL, "Using mock source");
                Arc::new(MockSentimentSource::new())
            }
        };

        let mut set = Self::new(technical, sentiment);

        if settings.macro_enabled {
            info!(source = MACRO_LABEL, "Using mock source");
            set = set.with_macro(Arc::new(MockMacroSource::new()));
        }

        match &settings.trade_plan_url {
            Some(url) => {
                info!(source = TRADE_PLAN_LABEL, %url, "Using x402 source");
                set = set.with_trade_plan(Arc::new(X402Source::<TradePlan>::new(
                    TRADE_PLAN_LABEL,
                    url,
                    Arc::clone(client),
                )));
            }
            None if settings.trade_plan_enabled => {
                info!(source = TRADE_PLAN_LABEL, "Using mock source");
                set = set.with_trade_plan(Arc::new(MockTradePlanSource::new()));
            }
            None => {}
        }

        set
    }
}
