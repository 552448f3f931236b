//! # Request Handlers
//!
//! Axum request handlers for the broker API. Handlers are thin glue: parse,
//! call into `OrderBroker`, wrap the result in the `{success, ...}` envelope
//! the web client expects. All failures become structured responses; nothing
//! in here can crash the process.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use broker_core::{BrokerError, CreateOrderRequest, Order, VerifyPaymentRequest};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Success envelope for a created or fetched order
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

/// Success envelope for a verified payment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_id: String,
    pub verified_at: DateTime<Utc>,
}

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            code,
        }
    }
}

fn broker_error_to_response(err: BrokerError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "order-broker",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a payment order
#[instrument(skip(state, request), fields(amount = ?request.amount))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, (StatusCode, Json<ErrorResponse>)> {
    let order = state.broker.create_order(request).await.map_err(|e| {
        if e.is_caller_error() {
            warn!("Order creation rejected: {}", e);
        } else {
            error!("Order creation failed: {}", e);
        }
        broker_error_to_response(e)
    })?;

    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// Verify a payment-completion claim
#[instrument(skip(state, request), fields(order_id = ?request.order_id))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let verified = state.broker.verify_payment(request).map_err(|e| {
        if e.is_caller_error() {
            warn!("Payment verification rejected: {}", e);
        } else {
            error!("Payment verification failed: {}", e);
        }
        broker_error_to_response(e)
    })?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        order_id: verified.order_id,
        payment_id: verified.payment_id,
        verified_at: verified.verified_at,
    }))
}

/// Fetch a single tracked order
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, (StatusCode, Json<ErrorResponse>)> {
    let order = state
        .broker
        .get_order(&order_id)
        .map_err(broker_error_to_response)?;

    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// List all tracked orders with aggregates
pub async fn list_orders(State(state): State<AppState>) -> impl IntoResponse {
    let orders = state.broker.list_orders();
    Json(serde_json::json!({
        "success": true,
        "count": orders.len(),
        "total_amount": state.broker.total_amount(),
        "orders": orders
    }))
}

/// Empty the ledger (operational/testing escape hatch)
pub async fn clear_orders(State(state): State<AppState>) -> impl IntoResponse {
    let cleared = state.broker.clear_orders();
    Json(serde_json::json!({
        "success": true,
        "cleared": cleared
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_envelope() {
        let err = ErrorResponse::new("Test error", 400);
        assert!(!err.success);
        assert_eq!(err.message, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_broker_error_conversion() {
        let err = BrokerError::SignatureMismatch {
            order_id: "order_x".to_string(),
        };
        let (status, Json(body)) = broker_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);

        let err = BrokerError::ServerMisconfigured("no secret".to_string());
        let (status, Json(body)) = broker_error_to_response(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        // Never leak the secret itself; the message names the condition only
        assert!(body.message.contains("misconfigured"));
    }

    #[test]
    fn test_verify_response_uses_camel_case_keys() {
        let response = VerifyPaymentResponse {
            success: true,
            order_id: "order_abc".to_string(),
            payment_id: "pay_123".to_string(),
            verified_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("orderId").is_some());
        assert!(json.get("paymentId").is_some());
        assert!(json.get("verifiedAt").is_some());
    }
}
