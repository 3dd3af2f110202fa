//! LLM provider abstraction for vibe-trade
//!
//! The analysis pipeline only needs short text completions (the routing
//! classifier), so messages here are plain text. It includes:
//!
//! - Message and completion request/response types
//! - Provider trait for LLM implementations
//! - JSON extraction from free-form model output
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod json;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use json::{extract_json, parse_json_reply};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(any(feature = "openai", feature = "anthropic"))]
pub mod providers;
