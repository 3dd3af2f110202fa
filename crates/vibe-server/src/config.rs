//! Server configuration loaded from the environment

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use vibe_engine::{EngineConfig, LlmRouter};
use vibe_llm::LLMProvider;
use vibe_llm::providers::{AnthropicProvider, OpenAIProvider};
use vibe_sources::SourceSettings;
use vibe_utils::{ServiceInfo, env_or, env_parse, env_string};
use vibe_x402::PaymentSettings;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-latest";

/// Which LLM backs the routing classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingBackend {
    OpenAI { model: String },
    Anthropic { model: String },
    /// No key configured; routing always calls every source
    Disabled,
}

impl RoutingBackend {
    /// `OPENAI_API_KEY` wins over `ANTHROPIC_API_KEY`
    pub fn from_env() -> Self {
        if env_string("OPENAI_API_KEY").is_some() {
            Self::OpenAI {
                model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            }
        } else if env_string("ANTHROPIC_API_KEY").is_some() {
            Self::Anthropic {
                model: env_or("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
            }
        } else {
            Self::Disabled
        }
    }

    /// Model name, if any
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::OpenAI { model } | Self::Anthropic { model } => Some(model),
            Self::Disabled => None,
        }
    }

    /// Build the router
    ///
    /// A provider that cannot be constructed disables routing instead of
    /// failing startup.
    pub fn into_router(self, timeout: Duration) -> LlmRouter {
        let provider: Result<(Arc<dyn LLMProvider>, String), vibe_llm::LLMError> = match self {
            Self::OpenAI { model } => OpenAIProvider::from_env()
                .map(|p| (Arc::new(p) as Arc<dyn LLMProvider>, model)),
            Self::Anthropic { model } => AnthropicProvider::from_env()
                .map(|p| (Arc::new(p) as Arc<dyn LLMProvider>, model)),
            Self::Disabled => {
                info!("No LLM key configured, routing disabled");
                return LlmRouter::disabled();
            }
        };

        match provider {
            Ok((provider, model)) => {
                info!(provider = provider.name(), %model, "Routing classifier enabled");
                LlmRouter::new(provider, model, timeout)
            }
            Err(e) => {
                warn!("Routing provider unavailable, routing disabled: {e}");
                LlmRouter::disabled()
            }
        }
    }
}

/// Everything the server reads at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub service: ServiceInfo,
    pub payment: PaymentSettings,
    pub sources: SourceSettings,
    pub engine: EngineConfig,
    pub routing: RoutingBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// `port` overrides `PORT` when given.
    pub fn from_env(port: Option<u16>) -> anyhow::Result<Self> {
        let port = match port {
            Some(port) => port,
            None => env_parse::<u16>("PORT")?.unwrap_or(DEFAULT_PORT),
        };
        let bind_addr = SocketAddr::from(([0, 0, 0, 0], port));

        let payment = PaymentSettings::from_env();
        let routing = RoutingBackend::from_env();
        let mut engine = EngineConfig::builder().budget(payment.budget());
        if let Some(ms) = env_parse::<u64>("SOURCE_TIMEOUT_MS")? {
            engine = engine.source_timeout(Duration::from_millis(ms));
        }
        if let Some(model) = routing.model() {
            engine = engine.routing_model(model);
        }
        let engine = engine.build().context("invalid engine configuration")?;

        Ok(Self {
            bind_addr,
            service: ServiceInfo::from_env("vibe-trade", env!("CARGO_PKG_VERSION")),
            payment,
            sources: SourceSettings::from_env()?,
            engine,
            routing,
        })
    }
}
