//! HTTP surface for vibe-trade
//!
//! Public routes report health and documentation. The analysis routes
//! require an x402 payment; see [`payment`] for where each one checks it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod payment;
pub mod state;

pub use config::{RoutingBackend, ServerConfig};
pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let gated = Router::new()
        .route("/entrypoints/analyze/invoke", post(handlers::invoke_analyze))
        .route_layer(from_fn_with_state(state.clone(), payment::require_payment));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/docs", get(handlers::docs))
        .route("/api/v1/status", get(handlers::status))
        .route("/api/v1/trading-analysis", post(handlers::trading_analysis))
        .merge(gated)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;
    use vibe_engine::{AnalysisService, EngineConfig, LlmRouter};
    use vibe_sources::{
        MockMacroSource, MockSentimentSource, MockTechnicalSource, MockTradePlanSource, SourceSet,
    };
    use vibe_utils::ServiceInfo;
    use vibe_x402::{PaymentPayload, PaymentSettings};

    fn state_with(sources: SourceSet) -> AppState {
        let service = AnalysisService::new(EngineConfig::default(), LlmRouter::disabled(), sources);
        AppState::new(service, PaymentSettings::default(), ServiceInfo::default())
    }

    fn test_app() -> Router {
        app(state_with(SourceSet::mock()))
    }

    fn payment_header() -> String {
        let settings = PaymentSettings::default();
        PaymentPayload::for_requirement(&settings.requirement("test"))
            .encode()
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: &Value, paid: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if paid {
            builder = builder.header("x-payment", payment_header());
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "vibe-trade");
    }

    #[tokio::test]
    async fn test_docs_and_status() {
        let request = Request::builder().uri("/api/docs").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payment"]["protocol"], "x402");
        assert_eq!(body["payment"]["currency"], "USDC");
        assert_eq!(body["payment"]["prices"]["single_analysis"], "$0.10");

        let request = Request::builder().uri("/api/v1/status").body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "operational");
        assert_eq!(body["environment"], "development");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/v2/nothing")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["details"], "Endpoint DELETE /api/v2/nothing not found");
        assert!(body["timestamp"].is_i64());
    }

    #[tokio::test]
    async fn test_missing_payment_returns_402() {
        let request = post_json(
            "/api/v1/trading-analysis",
            &json!({"symbol": "BTC", "timeframe": "1h"}),
            false,
        );
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["code"], "PAYMENT_REQUIRED");
        assert_eq!(body["payment_required"]["amount"], "100000");
        assert_eq!(body["payment_required"]["network"], "base");
        assert_eq!(
            body["payment_required"]["recipient"],
            "0xb308ed39d67D0d4BAe5BC2FAEF60c66BBb6AE429"
        );
    }

    #[tokio::test]
    async fn test_empty_payment_header_returns_402() {
        let request = Request::builder()
            .method("POST")
            .uri("/entrypoints/analyze/invoke")
            .header("content-type", "application/json")
            .header("x-payment", "  ")
            .body(Body::from(json!({"input": {"symbol": "BTC"}}).to_string()))
            .unwrap();
        let (status, _) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    }

    #[tokio::test]
    async fn test_missing_timeframe_returns_400() {
        let request = post_json("/api/v1/trading-analysis", &json!({"symbol": "BTC"}), true);
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert_eq!(body["details"], "symbol and timeframe are required");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/trading-analysis")
            .header("content-type", "application/json")
            .header("x-payment", payment_header())
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_paid_trading_analysis() {
        let request = post_json(
            "/api/v1/trading-analysis",
            &json!({"symbol": "btc", "timeframe": "1d", "account_address": "0xabc"}),
            true,
        );
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "BTC");
        assert_eq!(body["timeframe"], "1d");
        assert_eq!(body["analysis"]["recommendation"]["action"], "BUY");
        assert_eq!(body["metadata"]["sources_called"], json!(["TAAPI", "AIXBT"]));
        assert_eq!(body["metadata"]["total_cost"], "90000");
        assert_eq!(body["portfolio"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_invoke_defaults_timeframe() {
        let request = post_json(
            "/entrypoints/analyze/invoke",
            &json!({"input": {"symbol": "SOL"}}),
            true,
        );
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"], "vibe-trade-v1");
        assert_eq!(body["output"]["timeframe"], "1h");
        assert_eq!(body["output"]["symbol"], "SOL");
    }

    #[tokio::test]
    async fn test_invoke_empty_symbol_returns_400() {
        let request = post_json(
            "/entrypoints/analyze/invoke",
            &json!({"input": {"symbol": "  "}}),
            true,
        );
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], "Symbol cannot be empty.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_sentiment_degrades() {
        let sources = SourceSet::new(
            Arc::new(MockTechnicalSource::new()),
            Arc::new(MockSentimentSource::new().with_latency(Duration::from_secs(3))),
        );
        let request = post_json(
            "/api/v1/trading-analysis",
            &json!({"symbol": "ETH", "timeframe": "1h"}),
            true,
        );
        let (status, body) = send(app(state_with(sources)), request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["analysis"]["sentiment"].is_null());
        assert_eq!(body["metadata"]["sources_called"], json!(["TAAPI"]));
        assert_eq!(
            body["analysis"]["recommendation"]["reasoning"],
            "Technical indicators show strength"
        );
    }

    #[tokio::test]
    async fn test_unpaid_invalid_body_returns_400() {
        let request = post_json("/api/v1/trading-analysis", &json!({}), false);
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
        assert_eq!(body["details"], "symbol and timeframe are required");

        let request = post_json(
            "/api/v1/trading-analysis",
            &json!({"symbol": " ", "timeframe": "1h"}),
            false,
        );
        let (status, _) = send(test_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unpaid_malformed_json_returns_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/trading-analysis")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_rpc_checks_payment_first() {
        let request = post_json(
            "/entrypoints/analyze/invoke",
            &json!({"input": {"symbol": ""}}),
            false,
        );
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["code"], "PAYMENT_REQUIRED");
    }

    #[tokio::test(start_paused = true)]
    async fn test_enriched_report_body() {
        let sources = SourceSet::mock()
            .with_macro(Arc::new(MockMacroSource::new()))
            .with_trade_plan(Arc::new(MockTradePlanSource::new()));
        let request = post_json(
            "/api/v1/trading-analysis",
            &json!({"symbol": "BTC", "timeframe": "1h"}),
            true,
        );
        let (status, body) = send(app(state_with(sources)), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["macro"]["environment"], "risk_on");
        assert_eq!(body["analysis"]["macro"]["impact"], "high");
        assert_eq!(body["analysis"]["recommendation"]["entry_price"], 43_100.0);
        assert_eq!(body["analysis"]["recommendation"]["position_size"], "2.5%");
        assert_eq!(
            body["metadata"]["sources_called"],
            json!(["TAAPI", "AIXBT", "Macro", "Dreams LLM"])
        );
    }
}
