//! Environment variable helpers
//!
//! Empty values are treated the same as unset ones.

use std::str::FromStr;
use thiserror::Error;

/// A variable was set but could not be parsed
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid value '{value}' for {key}: {reason}")]
pub struct EnvError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

/// Non-empty, trimmed value of `key`
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First non-empty value among `keys`
pub fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| env_string(key))
}

/// Value of `key`, or `default` when unset
pub fn env_or(key: &str, default: &str) -> String {
    env_string(key).unwrap_or_else(|| default.to_string())
}

/// Parse `key` when set
pub fn env_parse<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|value| {
            value.parse::<T>().map_err(|e| EnvError {
                key: key.to_string(),
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
