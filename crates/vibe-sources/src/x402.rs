//! Providers behind x402-paid HTTP endpoints

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};
use vibe_core::{DataSource, Error, Result, SourceQuery};
use vibe_x402::X402Client;

/// A source that POSTs `{symbol, timeframe}` to a paid endpoint
///
/// The response body is deserialized straight into `T`. Payment is capped
/// at the query's budget.
pub struct X402Source<T> {
    name: String,
    endpoint: String,
    client: Arc<X402Client>,
    _output: PhantomData<fn() -> T>,
}

impl<T> X402Source<T> {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        client: Arc<X402Client>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            client,
            _output: PhantomData,
        }
    }
}

#[async_trait]
impl<T> DataSource for X402Source<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, query), fields(source = %self.name, symbol = %query.symbol))]
    async fn fetch(&self, query: &SourceQuery) -> Result<T> {
        let response = self
            .client
            .call::<T, _>(&self.endpoint, query, query.budget)
            .await
            .map_err(|e| Error::source_failed(&self.name, e))?;

        debug!(
            tx = %response.receipt.transaction_hash,
            amount = %response.receipt.amount,
            "Source call paid"
        );
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::routing::post;
    use serde_json::{Value, json};
    use vibe_core::{SentimentSnapshot, Timeframe};

    async fn echo(Json(body): Json<Value>) -> Json<Value> {
        let symbol = body["symbol"].as_str().unwrap_or("");
        let timeframe = body["timeframe"].as_str().unwrap_or("");
        Json(json!({
            "market_sentiment": "bearish",
            "narrative": format!("{symbol} on {timeframe}"),
        }))
    }

    async fn spawn_upstream() -> String {
        let app = axum::Router::new().route("/sentiment", post(echo));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_fetch_deserializes_body() {
        let base = spawn_upstream().await;
        let client = Arc::new(X402Client::new(None, "base").unwrap());
        let source: X402Source<SentimentSnapshot> =
            X402Source::new("AIXBT", format!("{base}/sentiment"), client);

        let snapshot = source
            .fetch(&SourceQuery::new("SOL", Timeframe::FourHours).with_budget(30_000))
            .await
            .unwrap();

        assert_eq!(snapshot.market_sentiment.as_deref(), Some("bearish"));
        assert_eq!(snapshot.narrative.as_deref(), Some("SOL on 4h"));
        assert_eq!(snapshot.confidence, None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_source_failure() {
        let client = Arc::new(X402Client::new(None, "base").unwrap());
        let source: X402Source<SentimentSnapshot> =
            X402Source::new("AIXBT", "http://127.0.0.1:1/sentiment", client);

        let err = source
            .fetch(&SourceQuery::new("SOL", Timeframe::OneHour))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SourceFailed { ref source_name, .. } if source_name == "AIXBT"
        ));
    }
}
