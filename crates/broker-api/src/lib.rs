//! # broker-api
//!
//! HTTP API layer for order-broker-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for order creation, payment verification, and ledger
//!   introspection
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/orders` | Create a payment order |
//! | GET | `/api/v1/orders` | List tracked orders |
//! | GET | `/api/v1/orders/{order_id}` | Fetch one order |
//! | DELETE | `/api/v1/orders` | Clear the ledger |
//! | POST | `/api/v1/payments/verify` | Verify a payment claim |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
