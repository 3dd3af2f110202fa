//! Shared utilities for vibe-trade
//!
//! Logging setup, environment variable helpers and the service metadata
//! reported by the status endpoints.

pub mod config;
pub mod env;
pub mod logging;

pub use config::ServiceInfo;
pub use env::{EnvError, env_or, env_parse, env_string, first_env};
pub use logging::{LogFormat, init_tracing};
