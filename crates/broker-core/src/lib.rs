//! # broker-core
//!
//! Order lifecycle and payment-verification core for order-broker-rs.
//!
//! This crate provides:
//! - `Order`, `OrderStatus`, and the in-process `OrderLedger`
//! - `AmountPolicy` bounds validation for requested amounts
//! - The HMAC-SHA256 signature primitive over `order_id|payment_id`
//! - `PaymentGateway` trait for gateway clients
//! - `OrderBroker` with the order-creation and payment-verification flows
//! - `BrokerError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use broker_core::{CreateOrderRequest, OrderBroker, OrderLedger, VerifyPaymentRequest};
//!
//! let broker = OrderBroker::new(OrderLedger::new(), Some(gateway));
//!
//! // Mint an order (amount in paise)
//! let order = broker.create_order(CreateOrderRequest {
//!     amount: Some(50000),
//!     ..Default::default()
//! }).await?;
//!
//! // Later, verify a payment claim
//! let verified = broker.verify_payment(VerifyPaymentRequest {
//!     order_id: Some(order.id),
//!     payment_id: Some(payment_id),
//!     signature: Some(signature),
//! })?;
//! ```

pub mod amount;
pub mod broker;
pub mod error;
pub mod gateway;
pub mod ledger;
pub mod order;
pub mod signature;

// Re-exports for convenience
pub use amount::{AmountPolicy, Currency, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT};
pub use broker::{CreateOrderRequest, OrderBroker, VerifiedPayment, VerifyPaymentRequest};
pub use error::{BrokerError, BrokerResult};
pub use gateway::{BoxedPaymentGateway, GatewayOrder, GatewayOrderRequest, PaymentGateway};
pub use ledger::OrderLedger;
pub use order::{generate_receipt, normalize_receipt, Order, OrderStatus, MAX_RECEIPT_LEN};
pub use signature::{expected_signature, verify_signature};
