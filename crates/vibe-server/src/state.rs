//! Shared application state

use crate::config::ServerConfig;
use std::sync::Arc;
use std::time::Instant;
use vibe_engine::AnalysisService;
use vibe_sources::SourceSet;
use vibe_utils::ServiceInfo;
use vibe_x402::{PaymentSettings, X402Client};

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
    pub payment: Arc<PaymentSettings>,
    pub info: Arc<ServiceInfo>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: AnalysisService, payment: PaymentSettings, info: ServiceInfo) -> Self {
        Self {
            service: Arc::new(service),
            payment: Arc::new(payment),
            info: Arc::new(info),
            started_at: Instant::now(),
        }
    }

    /// Wire the pipeline from startup configuration
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let client = Arc::new(X402Client::with_timeout(
            config.payment.private_key.clone(),
            &config.payment.network,
            config.engine.source_timeout,
        )?);
        let sources = SourceSet::from_settings(&config.sources, &client);
        let router = config
            .routing
            .clone()
            .into_router(config.engine.routing_timeout);

        let service = AnalysisService::new(config.engine.clone(), router, sources);
        Ok(Self::new(
            service,
            config.payment.clone(),
            config.service.clone(),
        ))
    }
}
