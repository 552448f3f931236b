//! # Order Ledger
//!
//! In-process table of orders this server believes it created, keyed by the
//! gateway-assigned order ID. State lives for the lifetime of the process;
//! there is no persistence and no recovery after restart.
//!
//! Axum runs handlers on multiple workers, and the read-modify-write of
//! status + payment_id + timestamp during verification is not atomic, so
//! the whole map sits behind one `RwLock`. The lock is never held across an
//! await point.

use crate::error::{BrokerError, BrokerResult};
use crate::order::{Order, OrderStatus};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared in-memory order table.
///
/// Cloning is cheap and all clones observe the same underlying map.
/// Invariant: every key equals its value's `id`, and an order is inserted
/// exactly once, at creation time; later mutation is in-place field update.
#[derive(Clone, Default)]
pub struct OrderLedger {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl OrderLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a freshly created order.
    ///
    /// Gateway order IDs are unique per account, so a collision means a
    /// duplicate gateway response; the first occurrence wins.
    pub fn insert(&self, order: Order) {
        let mut orders = self.orders.write().expect("order ledger lock poisoned");
        orders.entry(order.id.clone()).or_insert(order);
    }

    /// Fetch one order by ID
    pub fn get(&self, order_id: &str) -> BrokerResult<Order> {
        let orders = self.orders.read().expect("order ledger lock poisoned");
        orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| BrokerError::OrderNotFound {
                order_id: order_id.to_string(),
            })
    }

    /// Check whether an order ID is tracked
    pub fn contains(&self, order_id: &str) -> bool {
        let orders = self.orders.read().expect("order ledger lock poisoned");
        orders.contains_key(order_id)
    }

    /// Transition an order to `Verified`, recording the payment ID and the
    /// verification timestamp. Idempotent on the success path: re-verifying
    /// an already-verified order succeeds again.
    pub fn mark_verified(&self, order_id: &str, payment_id: &str) -> BrokerResult<Order> {
        let mut orders = self.orders.write().expect("order ledger lock poisoned");
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| BrokerError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;

        order.status = OrderStatus::Verified;
        order.payment_id = Some(payment_id.to_string());
        order.verified_at = Some(Utc::now());
        Ok(order.clone())
    }

    /// Transition an order to `VerificationFailed` and bump the mismatch
    /// counter. The claimed payment ID is recorded alongside the transition;
    /// `amount`, `currency`, and `receipt` are never touched.
    pub fn mark_failed(&self, order_id: &str, payment_id: &str) -> BrokerResult<Order> {
        let mut orders = self.orders.write().expect("order ledger lock poisoned");
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| BrokerError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;

        order.status = OrderStatus::VerificationFailed;
        order.payment_id = Some(payment_id.to_string());
        order.verification_attempts += 1;
        Ok(order.clone())
    }

    /// Snapshot of all tracked orders
    pub fn list(&self) -> Vec<Order> {
        let orders = self.orders.read().expect("order ledger lock poisoned");
        orders.values().cloned().collect()
    }

    /// Number of tracked orders
    pub fn len(&self) -> usize {
        let orders = self.orders.read().expect("order ledger lock poisoned");
        orders.len()
    }

    /// Check if the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all tracked order amounts, in minor units
    pub fn total_amount(&self) -> i64 {
        let orders = self.orders.read().expect("order ledger lock poisoned");
        orders.values().map(|o| o.amount).sum()
    }

    /// Remove every entry, returning how many were removed.
    /// Exposed for operational visibility and testing only.
    pub fn clear(&self) -> usize {
        let mut orders = self.orders.write().expect("order ledger lock poisoned");
        let cleared = orders.len();
        orders.clear();
        cleared
    }
}
