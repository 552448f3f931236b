//! # Order Broker
//!
//! The two flows of the system: order creation (validate, mint at the
//! gateway, record in the ledger) and payment verification (validate the
//! claim, recompute the signature, transition the ledger entry). Both
//! operate on an injected [`OrderLedger`] so tests get a fresh ledger each.
//!
//! The broker consumes already-parsed request data and produces either a
//! typed result or a [`BrokerError`]; HTTP is someone else's problem.

use crate::amount::{AmountPolicy, Currency};
use crate::error::{BrokerError, BrokerResult};
use crate::gateway::{BoxedPaymentGateway, GatewayOrderRequest};
use crate::ledger::OrderLedger;
use crate::order::{normalize_receipt, Order};
use crate::signature::verify_signature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Parsed create-order request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in the smallest currency unit (paise); no ×100 conversion
    /// is applied anywhere
    #[serde(default)]
    pub amount: Option<i64>,
    /// Currency, defaults to the broker's default (INR)
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Reference token; oversized values are silently regenerated
    #[serde(default)]
    pub receipt: Option<String>,
}

/// Parsed verify-payment request: the three identifiers a client submits
/// when asserting a payment completed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

/// Result of a successful payment verification
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedPayment {
    pub order_id: String,
    pub payment_id: String,
    pub verified_at: DateTime<Utc>,
}

/// The order lifecycle and payment-verification subsystem.
///
/// Holds the ledger, the (optional) gateway client, and the amount policy.
/// Cloning shares the underlying ledger.
#[derive(Clone)]
pub struct OrderBroker {
    ledger: OrderLedger,
    gateway: Option<BoxedPaymentGateway>,
    policy: AmountPolicy,
    default_currency: Currency,
}

impl OrderBroker {
    /// Create a broker. `gateway: None` models missing credentials: every
    /// create-order call fails fast with `ServiceUnavailable` and every
    /// verification with `ServerMisconfigured`, without any network I/O.
    pub fn new(ledger: OrderLedger, gateway: Option<BoxedPaymentGateway>) -> Self {
        Self {
            ledger,
            gateway,
            policy: AmountPolicy::default(),
            default_currency: Currency::default(),
        }
    }

    /// Override the amount bounds
    pub fn with_policy(mut self, policy: AmountPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the default currency
    pub fn with_default_currency(mut self, currency: Currency) -> Self {
        self.default_currency = currency;
        self
    }

    /// Order Creation flow.
    ///
    /// Validation order: amount present and numeric, amount within bounds,
    /// receipt normalized (never rejected). Only then is the gateway asked
    /// to mint the order; a gateway failure leaves no ledger entry.
    pub async fn create_order(&self, request: CreateOrderRequest) -> BrokerResult<Order> {
        let amount = self.policy.validate(request.amount)?;
        let currency = request.currency.unwrap_or(self.default_currency);
        let receipt = normalize_receipt(request.receipt);

        let gateway = self.gateway.as_ref().ok_or_else(|| {
            BrokerError::ServiceUnavailable("payment gateway credentials not configured".to_string())
        })?;

        let remote = gateway
            .create_order(&GatewayOrderRequest {
                amount,
                currency,
                receipt: receipt.clone(),
                auto_capture: true,
            })
            .await?;

        let order = Order::new(remote.id, amount, currency, receipt);
        self.ledger.insert(order.clone());

        info!(
            order_id = %order.id,
            amount = order.amount,
            currency = %order.currency,
            "Order created"
        );

        Ok(order)
    }

    /// Payment Verification flow.
    ///
    /// Recomputes HMAC-SHA256 over `order_id|payment_id` with the shared
    /// secret and compares it against the claim in constant time. Ledger
    /// membership is enforced: the `verified` status is attached to this
    /// process's own record, so claims for unknown orders are rejected
    /// before any cryptography runs.
    pub fn verify_payment(&self, request: VerifyPaymentRequest) -> BrokerResult<VerifiedPayment> {
        let order_id = required_field(request.order_id, "order_id")?;
        let payment_id = required_field(request.payment_id, "payment_id")?;
        let signature = required_field(request.signature, "signature")?;

        let secret = self
            .gateway
            .as_ref()
            .map(|g| g.signing_secret())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                BrokerError::ServerMisconfigured("payment signing secret not configured".to_string())
            })?;

        // Membership check before any HMAC work
        if !self.ledger.contains(&order_id) {
            return Err(BrokerError::OrderNotFound { order_id });
        }

        if verify_signature(&order_id, &payment_id, &signature, secret) {
            let order = self.ledger.mark_verified(&order_id, &payment_id)?;
            let verified_at = order.verified_at.unwrap_or_else(Utc::now);

            info!(order_id = %order_id, payment_id = %payment_id, "Payment verified");

            Ok(VerifiedPayment {
                order_id,
                payment_id,
                verified_at,
            })
        } else {
            let order = self.ledger.mark_failed(&order_id, &payment_id)?;

            warn!(
                order_id = %order_id,
                attempts = order.verification_attempts,
                "Payment signature mismatch"
            );

            Err(BrokerError::SignatureMismatch { order_id })
        }
    }

    /// Fetch one order by ID
    pub fn get_order(&self, order_id: &str) -> BrokerResult<Order> {
        self.ledger.get(order_id)
    }

    /// Snapshot of all tracked orders
    pub fn list_orders(&self) -> Vec<Order> {
        self.ledger.list()
    }

    /// Number of tracked orders
    pub fn order_count(&self) -> usize {
        self.ledger.len()
    }

    /// Sum of all tracked order amounts, minor units
    pub fn total_amount(&self) -> i64 {
        self.ledger.total_amount()
    }

    /// Empty the ledger, reporting how many entries were removed
    pub fn clear_orders(&self) -> usize {
        let cleared = self.ledger.clear();
        info!(cleared, "Order ledger cleared");
        cleared
    }
}

/// Trim a claimed field and reject empty/missing values, naming the field
fn required_field(value: Option<String>, field: &str) -> BrokerResult<String> {
    match value {
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                Err(BrokerError::MissingParameter {
                    field: field.to_string(),
                })
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Err(BrokerError::MissingParameter {
            field: field.to_string(),
        }),
    }
}
