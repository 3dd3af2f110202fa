//! HTTP client that pays x402 endpoints

use crate::{
    PaymentChallenge, PaymentError, PaymentPayload, PaymentReceipt, Result, X_PAYMENT,
    X_PAYMENT_RESPONSE,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Body plus settlement receipt of a paid call
#[derive(Debug, Clone)]
pub struct X402Response<T> {
    pub data: T,
    pub receipt: PaymentReceipt,
}

/// Paying HTTP client
///
/// Built once at startup and shared by the x402 sources.
#[derive(Clone)]
pub struct X402Client {
    client: Client,
    private_key: Option<String>,
    network: String,
}

impl X402Client {
    /// Create a client
    ///
    /// Without a private key, any endpoint that answers 402 fails with
    /// [`PaymentError::PaymentUnavailable`].
    pub fn new(private_key: Option<String>, network: impl Into<String>) -> Result<Self> {
        Self::with_timeout(
            private_key,
            network,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a client with a custom per-request timeout
    pub fn with_timeout(
        private_key: Option<String>,
        network: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            private_key,
            network: network.into(),
        })
    }

    /// Whether 402 challenges will be paid
    pub fn can_pay(&self) -> bool {
        self.private_key.is_some()
    }

    /// POST `payload` to `endpoint`, paying at most `max_amount` base units
    ///
    /// One unpaid attempt, then at most one paid retry.
    #[instrument(skip(self, payload), fields(network = %self.network))]
    pub async fn call<T, P>(
        &self,
        endpoint: &str,
        payload: &P,
        max_amount: u64,
    ) -> Result<X402Response<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let mut response = self.client.post(endpoint).json(payload).send().await?;

        if response.status() == StatusCode::PAYMENT_REQUIRED {
            let challenge: PaymentChallenge = response.json().await.map_err(|e| {
                PaymentError::InvalidRequirement(format!("unreadable 402 body: {e}"))
            })?;
            let header = self.authorize(endpoint, &challenge, max_amount)?;

            info!(
                amount = %challenge.payment_required.amount,
                recipient = %challenge.payment_required.recipient,
                "Paying upstream endpoint"
            );

            response = self
                .client
                .post(endpoint)
                .header(X_PAYMENT, header)
                .json(payload)
                .send()
                .await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let receipt_header = response
            .headers()
            .get(X_PAYMENT_RESPONSE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let receipt = PaymentReceipt::decode_or_pending(receipt_header.as_deref(), &self.network);

        let data = response.json().await?;
        debug!(status = ?receipt.status, "Upstream call settled");

        Ok(X402Response { data, receipt })
    }

    /// Check the challenge against the key and budget, then build the header
    fn authorize(
        &self,
        endpoint: &str,
        challenge: &PaymentChallenge,
        max_amount: u64,
    ) -> Result<String> {
        if self.private_key.is_none() {
            return Err(PaymentError::PaymentUnavailable {
                endpoint: endpoint.to_string(),
            });
        }

        let demanded = challenge.payment_required.amount_units()?;
        if demanded > max_amount {
            return Err(PaymentError::BudgetExceeded {
                demanded,
                budget: max_amount,
            });
        }

        PaymentPayload::for_requirement(&challenge.payment_required).encode()
    }
}

impl fmt::Debug for X402Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X402Client")
            .field("network", &self.network)
            .field("can_pay", &self.can_pay())
            .finish_non_exhaustive()
    }
}
