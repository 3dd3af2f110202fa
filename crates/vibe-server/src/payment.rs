//! x402 payment gate
//!
//! Requests without an `X-Payment` header are answered with 402 and the
//! payment descriptor. The header is decoded for logging only; settlement
//! is not verified here.
//!
//! The RPC entrypoint is gated by [`require_payment`] before its body is
//! read. The REST endpoint validates its body first and then calls
//! [`check`], so a malformed request gets 400 whether or not it was paid.

use crate::state::AppState;
use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::debug;
use vibe_x402::{PaymentPayload, PaymentRequirement, PaymentSettings, X_PAYMENT};

const PAYMENT_DESCRIPTION: &str = "Trading analysis request";

/// Body of a 402 response
#[derive(Debug, Serialize)]
pub struct PaymentRequiredBody {
    pub error: &'static str,
    pub code: &'static str,
    pub payment_required: PaymentRequirement,
    pub timestamp: i64,
}

/// 402 response for `settings`
pub fn payment_required(settings: &PaymentSettings) -> Response {
    let body = PaymentRequiredBody {
        error: "Payment Required",
        code: "PAYMENT_REQUIRED",
        payment_required: settings.requirement(PAYMENT_DESCRIPTION),
        timestamp: chrono::Utc::now().timestamp_millis(),
    };
    (StatusCode::PAYMENT_REQUIRED, Json(body)).into_response()
}

/// Reject a request whose `X-Payment` header is missing or blank
///
/// A present header is decoded for logging only.
pub fn check(settings: &PaymentSettings, headers: &HeaderMap) -> Result<(), Response> {
    let payment = headers
        .get(X_PAYMENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(PaymentPayload::decode);

    match payment {
        None => return Err(payment_required(settings)),
        Some(Ok(payload)) => {
            debug!(
                amount = %payload.amount,
                recipient = %payload.recipient,
                "Payment header received"
            );
        }
        Some(Err(e)) => {
            debug!("Payment header not decodable, accepting unverified: {e}");
        }
    }

    Ok(())
}

/// Middleware rejecting unpaid requests
pub async fn require_payment(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Err(response) = check(&state.payment, req.headers()) {
        debug!(path = %req.uri().path(), "Rejecting unpaid request");
        return response;
    }

    next.run(req).await
}
