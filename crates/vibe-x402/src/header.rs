//! `X-Payment` and `X-Payment-Response` header codecs
//!
//! Both headers are base64-encoded JSON documents.

use crate::{CURRENCY, PaymentError, PaymentRequirement, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

fn encode_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(STANDARD.encode(serde_json::to_vec(value)?))
}

fn decode_json<T: DeserializeOwned>(header: &str) -> Result<T> {
    let bytes = STANDARD
        .decode(header.trim())
        .map_err(|e| PaymentError::InvalidHeader(format!("not base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| PaymentError::InvalidHeader(format!("not a payment document: {e}")))
}

/// Payment authorization sent in `X-Payment`
///
/// Unsigned; settlement verification is the facilitator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPayload {
    pub amount: String,
    pub recipient: String,
    /// Unix millis at creation, doubles as a nonce
    pub nonce: i64,
    /// Unix millis
    pub timestamp: i64,
}

impl PaymentPayload {
    /// Authorize exactly what `requirement` demands
    pub fn for_requirement(requirement: &PaymentRequirement) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            amount: requirement.amount.clone(),
            recipient: requirement.recipient.clone(),
            nonce: now,
            timestamp: now,
        }
    }

    /// Header value
    pub fn encode(&self) -> Result<String> {
        encode_json(self)
    }

    /// Parse a header value
    pub fn decode(header: &str) -> Result<Self> {
        decode_json(header)
    }
}

/// Settlement state reported by the upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Pending,
    Confirmed,
}

/// Settlement receipt returned in `X-Payment-Response`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction_hash: String,
    pub amount: String,
    pub currency: String,
    pub network: String,
    /// Unix millis
    pub timestamp: i64,
    pub status: ReceiptStatus,
}

impl PaymentReceipt {
    /// Placeholder used when the upstream sent no usable receipt
    pub fn pending(network: impl Into<String>) -> Self {
        Self {
            transaction_hash: "0x".to_string(),
            amount: "0".to_string(),
            currency: CURRENCY.to_string(),
            network: network.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            status: ReceiptStatus::Pending,
        }
    }

    /// Header value
    pub fn encode(&self) -> Result<String> {
        encode_json(self)
    }

    /// Parse a header value strictly
    pub fn decode(header: &str) -> Result<Self> {
        decode_json(header)
    }

    /// Parse a header value, falling back to [`PaymentReceipt::pending`]
    /// when it is missing or malformed
    pub fn decode_or_pending(header: Option<&str>, network: &str) -> Self {
        match header.map(Self::decode) {
            Some(Ok(receipt)) => receipt,
            Some(Err(e)) => {
                warn!("Ignoring malformed payment receipt: {e}");
                Self::pending(network)
            }
            None => Self::pending(network),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_for_requirement() {
        let requirement = PaymentRequirement::usdc(30_000, "base", "0xabc", "TAAPI");
        let payload = PaymentPayload::for_requirement(&requirement);
        assert_eq!(payload.amount, "30000");
        assert_eq!(payload.recipient, "0xabc");
        assert_eq!(payload.nonce, payload.timestamp);

        let header = payload.encode().unwrap();
        assert_eq!(PaymentPayload::decode(&header).unwrap(), payload);
    }

    #[test]
    fn test_payload_decode_garbage() {
        assert!(matches!(
            PaymentPayload::decode("%%%not-base64"),
            Err(PaymentError::InvalidHeader(_))
        ));

        let not_json = STANDARD.encode("hello");
        assert!(matches!(
            PaymentPayload::decode(&not_json),
            Err(PaymentError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_receipt_wire_format() {
        let json = serde_json::json!({
            "transaction_hash": "0x12",
            "amount": "30000",
            "currency": "USDC",
            "network": "base",
            "timestamp": 5,
            "status": "confirmed",
        });
        let header = STANDARD.encode(json.to_string());
        let receipt = PaymentReceipt::decode_or_pending(Some(&header), "base");
        assert_eq!(receipt.transaction_hash, "0x12");
        assert_eq!(receipt.status, ReceiptStatus::Confirmed);
    }

    #[test]
    fn test_receipt_fallback() {
        let missing = PaymentReceipt::decode_or_pending(None, "base-sepolia");
        assert_eq!(missing.transaction_hash, "0x");
        assert_eq!(missing.amount, "0");
        assert_eq!(missing.currency, "USDC");
        assert_eq!(missing.network, "base-sepolia");
        assert_eq!(missing.status, ReceiptStatus::Pending);

        let garbage = PaymentReceipt::decode_or_pending(Some("!!"), "base");
        assert_eq!(garbage.status, ReceiptStatus::Pending);
        assert_eq!(garbage.network, "base");
    }
}
