//! HTTP handlers

use crate::error::ApiError;
use crate::payment;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;
use vibe_core::{AnalysisReport, AnalysisRequest, Timeframe};
use vibe_x402::CURRENCY;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format base units (6 decimals) as dollars, e.g. 100000 -> "$0.10"
fn format_usd(units: u64) -> String {
    let cents = units / 10_000;
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.info.name,
        "version": state.info.version,
        "timestamp": now_millis(),
    }))
}

/// `GET /api/docs`
pub async fn docs(State(state): State<AppState>) -> Json<Value> {
    let payment = &state.payment;
    Json(json!({
        "service": "Vibe Trade - AI Trading Intelligence API",
        "version": state.info.version,
        "description": "Trading analysis from paid data sources, sold per request over x402",
        "endpoints": {
            "GET /health": "Health check",
            "GET /api/docs": "API documentation",
            "GET /api/v1/status": "Service status",
            "POST /api/v1/trading-analysis": "Single asset analysis (requires X-Payment)",
            "POST /entrypoints/analyze/invoke": "RPC style analysis (requires X-Payment)",
        },
        "timeframes": Timeframe::ALL.iter().map(Timeframe::as_str).collect::<Vec<_>>(),
        "payment": {
            "protocol": "x402",
            "network": payment.network,
            "currency": CURRENCY,
            "recipient": payment.pay_to,
            "facilitator": payment.facilitator_url,
            "amount": payment.price.to_string(),
            "prices": {
                "single_analysis": format_usd(payment.price),
            },
        },
    }))
}

/// `GET /api/v1/status`
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": state.info.name,
        "status": "operational",
        "environment": state.info.environment,
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "timestamp": now_millis(),
    }))
}

/// Body of `POST /api/v1/trading-analysis`
#[derive(Debug, Default, Deserialize)]
pub struct TradingAnalysisBody {
    pub symbol: Option<String>,
    pub timeframe: Option<String>,
    pub query: Option<String>,
    pub account_address: Option<String>,
}

impl TradingAnalysisBody {
    /// Both `symbol` and `timeframe` must be present and non-blank
    fn into_request(self) -> Result<AnalysisRequest, ApiError> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !present(&self.symbol) || !present(&self.timeframe) {
            return Err(ApiError::missing_fields("symbol and timeframe are required"));
        }

        let timeframe: Timeframe = self.timeframe.unwrap_or_default().parse()?;
        Ok(AnalysisRequest {
            symbol: self.symbol.unwrap_or_default(),
            query: self.query,
            timeframe,
            account_address: self.account_address,
        })
    }
}

/// `POST /api/v1/trading-analysis`
///
/// The body is validated before payment is checked.
pub async fn trading_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<TradingAnalysisBody>, JsonRejection>,
) -> Result<Json<AnalysisReport>, Response> {
    let request = body
        .map_err(ApiError::from)
        .and_then(|Json(body)| body.into_request())
        .map_err(IntoResponse::into_response)?;

    payment::check(&state.payment, &headers)?;

    info!(
        symbol = %request.symbol,
        timeframe = %request.timeframe,
        "Trading analysis requested"
    );
    let report = state
        .service
        .analyze(request)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;
    Ok(Json(report))
}

/// Body of `POST /entrypoints/analyze/invoke`
#[derive(Debug, Deserialize)]
pub struct InvokeBody {
    pub input: AnalysisRequest,
}

/// Result of `POST /entrypoints/analyze/invoke`
#[derive(Debug, Serialize, Deserialize)]
pub struct InvokeResponse {
    pub output: AnalysisReport,
    pub model: String,
}

/// `POST /entrypoints/analyze/invoke`
pub async fn invoke_analyze(
    State(state): State<AppState>,
    body: Result<Json<InvokeBody>, JsonRejection>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let Json(body) = body?;

    info!(symbol = %body.input.symbol, "Analyze entrypoint invoked");
    let output = state.service.analyze(body.input).await?;
    Ok(Json(InvokeResponse {
        output,
        model: state.service.config().model_name.clone(),
    }))
}

/// Fallback for unknown routes
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(method.as_str(), uri.path())
}
