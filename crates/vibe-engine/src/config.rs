//! Configuration for the analysis pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vibe_core::{Error, Result};
use vibe_x402::{SpendBudget, settings::DEFAULT_PRICE};

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Deadline for each upstream source call
    pub source_timeout: Duration,

    /// Deadline for the routing LLM call
    pub routing_timeout: Duration,

    /// Entry price and the upstream spend it allows
    pub budget: SpendBudget,

    /// Model used for routing
    pub routing_model: String,

    /// Model label reported by the RPC entrypoint
    pub model_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_millis(2000),
            routing_timeout: Duration::from_millis(2000),
            budget: SpendBudget::from_price(DEFAULT_PRICE),
            routing_model: "gpt-4o-mini".to_string(),
            model_name: "vibe-trade-v1".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source_timeout.is_zero() {
            return Err(Error::Config(
                "source_timeout must be greater than 0".to_string(),
            ));
        }

        if self.routing_timeout.is_zero() {
            return Err(Error::Config(
                "routing_timeout must be greater than 0".to_string(),
            ));
        }

        if self.budget.price == 0 {
            return Err(Error::Config("price must be greater than 0".to_string()));
        }

        if self.routing_model.trim().is_empty() {
            return Err(Error::Config("routing_model cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    source_timeout: Option<Duration>,
    routing_timeout: Option<Duration>,
    budget: Option<SpendBudget>,
    routing_model: Option<String>,
    model_name: Option<String>,
}

impl EngineConfigBuilder {
    /// Set the per-source deadline
    pub fn source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = Some(timeout);
        self
    }

    /// Set the routing deadline
    pub fn routing_timeout(mut self, timeout: Duration) -> Self {
        self.routing_timeout = Some(timeout);
        self
    }

    /// Set the spend budget
    pub fn budget(mut self, budget: SpendBudget) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Set the routing model
    pub fn routing_model(mut self, model: impl Into<String>) -> Self {
        self.routing_model = Some(model.into());
        self
    }

    /// Set the reported model label
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let defaults = EngineConfig::default();

        let config = EngineConfig {
            source_timeout: self.source_timeout.unwrap_or(defaults.source_timeout),
            routing_timeout: self.routing_timeout.unwrap_or(defaults.routing_timeout),
            budget: self.budget.unwrap_or(defaults.budget),
            routing_model: self.routing_model.unwrap_or(defaults.routing_model),
            model_name: self.model_name.unwrap_or(defaults.model_name),
        };

        config.validate()?;
        Ok(config)
    }
}
