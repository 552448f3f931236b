//! # Order Types
//!
//! The `Order` record tracked by the ledger, its status machine, and the
//! receipt policy applied at creation time.

use crate::amount::Currency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gateways cap the receipt field; Razorpay rejects anything longer.
pub const MAX_RECEIPT_LEN: usize = 40;

/// Verification status of a tracked order.
///
/// Transitions only move forward from `Created`. A `VerificationFailed`
/// order may still reach `Verified` when a later correct signature arrives:
/// a transient bad submission should not permanently lock an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order minted at the gateway, awaiting a payment claim
    Created,
    /// A payment claim passed signature verification
    Verified,
    /// The most recent payment claim failed signature verification
    VerificationFailed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Created
    }
}

/// One payment attempt tracked by this process.
///
/// `id` is assigned by the gateway and doubles as the ledger key. `amount`,
/// `currency`, and `receipt` are immutable after creation; verification only
/// ever touches `status`, `payment_id`, `verification_attempts`, and
/// `verified_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Gateway-assigned order ID (ledger key)
    pub id: String,

    /// Amount in the smallest currency unit (paise/cents)
    pub amount: i64,

    /// Currency
    pub currency: Currency,

    /// Caller-supplied or generated reference token
    pub receipt: String,

    /// Verification status
    #[serde(default)]
    pub status: OrderStatus,

    /// Gateway-assigned payment ID, set together with the status transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,

    /// Mismatch counter, kept for abuse detection, never used for blocking
    #[serde(default)]
    pub verification_attempts: u32,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Set only on successful verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Create a new order record with status `Created`
    pub fn new(
        id: impl Into<String>,
        amount: i64,
        currency: Currency,
        receipt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            currency,
            receipt: receipt.into(),
            status: OrderStatus::Created,
            payment_id: None,
            verification_attempts: 0,
            created_at: Utc::now(),
            verified_at: None,
        }
    }

    /// Check if this order has been verified
    pub fn is_verified(&self) -> bool {
        matches!(self.status, OrderStatus::Verified)
    }
}

/// Generate a receipt token: unix timestamp plus a random suffix
pub fn generate_receipt() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("rcpt_{}_{}", Utc::now().timestamp(), &suffix[..8])
}

/// Apply the receipt policy to an optional caller-supplied value.
///
/// Absent or oversized receipts are replaced with a generated token rather
/// than rejected; the gateway would reject an oversized one outright.
pub fn normalize_receipt(receipt: Option<String>) -> String {
    match receipt {
        Some(r) if !r.trim().is_empty() && r.len() <= MAX_RECEIPT_LEN => r,
        _ => generate_receipt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_starts_created() {
        let order = Order::new("order_abc", 50000, Currency::INR, "rcpt_1");

        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.amount, 50000);
        assert!(order.payment_id.is_none());
        assert!(order.verified_at.is_none());
        assert_eq!(order.verification_attempts, 0);
        assert!(!order.is_verified());
    }

    #[test]
    fn test_generated_receipt_within_bound() {
        let receipt = generate_receipt();
        assert!(receipt.starts_with("rcpt_"));
        assert!(receipt.len() <= MAX_RECEIPT_LEN);
    }

    #[test]
    fn test_normalize_keeps_valid_receipt() {
        let receipt = normalize_receipt(Some("invoice-2024-001".to_string()));
        assert_eq!(receipt, "invoice-2024-001");
    }

    #[test]
    fn test_normalize_replaces_oversized_receipt() {
        let long = "x".repeat(MAX_RECEIPT_LEN + 1);
        let receipt = normalize_receipt(Some(long.clone()));
        assert_ne!(receipt, long);
        assert!(receipt.len() <= MAX_RECEIPT_LEN);
    }

    #[test]
    fn test_normalize_replaces_blank_and_missing() {
        assert!(normalize_receipt(None).starts_with("rcpt_"));
        assert!(normalize_receipt(Some("   ".to_string())).starts_with("rcpt_"));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::VerificationFailed).unwrap();
        assert_eq!(json, "\"verification_failed\"");
    }
}
