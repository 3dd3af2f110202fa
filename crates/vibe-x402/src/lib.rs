//! x402 micropayment plumbing
//!
//! The x402 convention: a paid endpoint answers `402 Payment Required`
//! with a [`PaymentRequirement`], the caller retries with an `X-Payment`
//! header, and the server reports settlement in `X-Payment-Response`.
//!
//! This crate provides:
//!
//! - [`PaymentRequirement`], [`PaymentPayload`] and [`PaymentReceipt`] codecs
//! - [`SpendBudget`] for splitting the entry price across sources
//! - [`X402Client`] for paying upstream endpoints
//! - [`PaymentSettings`] loaded from the environment

pub mod budget;
pub mod client;
pub mod error;
pub mod header;
pub mod requirement;
pub mod settings;

pub use budget::SpendBudget;
pub use client::{X402Client, X402Response};
pub use error::{PaymentError, Result};
pub use header::{PaymentPayload, PaymentReceipt, ReceiptStatus};
pub use requirement::{PaymentChallenge, PaymentRequirement};
pub use settings::PaymentSettings;

/// Request header carrying the payment
pub const X_PAYMENT: &str = "x-payment";

/// Response header carrying the settlement receipt
pub const X_PAYMENT_RESPONSE: &str = "x-payment-response";

/// Currency every price in this crate is denominated in
pub const CURRENCY: &str = "USDC";
