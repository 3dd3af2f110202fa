//! Trading analysis pipeline
//!
//! One request flows through:
//!
//! 1. validation ([`vibe_core::AnalysisRequest::normalized`])
//! 2. budgeting ([`vibe_x402::SpendBudget`])
//! 3. routing ([`LlmRouter`])
//! 4. a parallel, individually time-boxed fan-out ([`fan_out`])
//! 5. synthesis ([`synthesize`], [`apply_trade_plan`])
//!
//! [`AnalysisService`] wires the steps together.

pub mod config;
pub mod fanout;
pub mod race;
pub mod routing;
pub mod service;
pub mod synth;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use fanout::{FanOut, fan_out};
pub use race::{SourceOutcome, call_with_timeout};
pub use routing::{LlmRouter, RoutingDecision, parse_decision};
pub use service::AnalysisService;
pub use synth::{apply_trade_plan, determine_action, synthesize};
