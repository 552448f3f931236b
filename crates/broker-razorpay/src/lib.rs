//! # broker-razorpay
//!
//! Razorpay gateway client for order-broker-rs.
//!
//! This crate provides:
//! - `RazorpayConfig` loaded from environment variables
//! - `RazorpayGateway`, a `PaymentGateway` implementation over the
//!   Razorpay orders API
//!
//! ## Environment
//!
//! | Variable | Purpose |
//! |----------|---------|
//! | `RAZORPAY_KEY_ID` | API key ID (`rzp_test_...` / `rzp_live_...`) |
//! | `RAZORPAY_KEY_SECRET` | API key secret; also the HMAC signing secret |

pub mod config;
pub mod orders;

pub use config::RazorpayConfig;
pub use orders::RazorpayGateway;
