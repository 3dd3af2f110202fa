//! Service metadata

use crate::env::env_or;
use serde::{Deserialize, Serialize};

/// Name, version and environment reported by the status endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Environment (development, production, ...)
    pub environment: String,
}

impl ServiceInfo {
    /// Build from the calling crate's name/version and `APP_ENV`
    pub fn from_env(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            environment: env_or("APP_ENV", "development"),
        }
    }
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "vibe-trade".to_string(),
            version: "0.1.0".to_string(),
            environment: "development".to_string(),
        }
    }
}
