//! Timeout-raced source calls
//!
//! Every upstream call races a deadline. Whatever happens, the caller
//! gets a [`SourceOutcome`]; errors never propagate past this point.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use vibe_core::Result;

/// What happened to one source call
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    /// The source answered in time
    Data(T),
    /// The source returned an error
    Failed(String),
    /// The deadline fired first
    TimedOut,
    /// Routing decided not to call the source
    Skipped,
}

impl<T> SourceOutcome<T> {
    /// Whether the source produced a payload
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Collapse to the payload; every non-data outcome is absent
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }
}

/// Race `operation` against `timeout`
///
/// On timeout the operation future is dropped, which cancels any
/// in-flight work it owns.
pub async fn call_with_timeout<T, F>(
    name: &str,
    timeout: Duration,
    operation: F,
) -> SourceOutcome<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(Ok(data)) => {
            debug!("Source '{}' answered", name);
            SourceOutcome::Data(data)
        }
        Ok(Err(e)) => {
            warn!("Source '{}' failed: {}", name, e);
            SourceOutcome::Failed(e.to_string())
        }
        Err(_) => {
            warn!("Source '{}' timed out after {:?}", name, timeout);
            SourceOutcome::TimedOut
        }
    }
}
