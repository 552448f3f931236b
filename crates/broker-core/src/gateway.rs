//! # Payment Gateway Trait
//!
//! Seam between the broker and the external payment gateway. The broker
//! depends on the gateway through exactly two operations: minting a remote
//! order, and supplying the shared secret used as the HMAC key during
//! payment verification. The secret is never transmitted anywhere.

use crate::amount::Currency;
use crate::error::BrokerResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Parameters forwarded to the gateway's create-order operation
#[derive(Debug, Clone, Serialize)]
pub struct GatewayOrderRequest {
    /// Amount in the smallest currency unit
    pub amount: i64,
    /// Currency
    pub currency: Currency,
    /// Reference token, already validated/normalized by the broker
    pub receipt: String,
    /// Capture the payment automatically on authorization
    pub auto_capture: bool,
}

/// Order descriptor returned by the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order ID, globally unique per account
    pub id: String,
    /// Amount echoed back by the gateway, minor units
    pub amount: i64,
    /// Currency code echoed back by the gateway
    pub currency: String,
    /// Receipt echoed back by the gateway
    #[serde(default)]
    pub receipt: Option<String>,
    /// Gateway-side status string (e.g. "created")
    #[serde(default)]
    pub status: Option<String>,
}

/// Trait implemented by payment gateway clients.
///
/// The network side is async; the secret accessor is not, since the
/// signature check is CPU-bound and never suspends.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint an order at the gateway.
    ///
    /// # Returns
    /// The gateway's order descriptor, whose `id` becomes the ledger key.
    async fn create_order(&self, request: &GatewayOrderRequest) -> BrokerResult<GatewayOrder>;

    /// The secret shared between the gateway and this server, used purely
    /// as the HMAC key for payment-signature verification.
    fn signing_secret(&self) -> &str;

    /// Gateway name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway client (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
