//! # Application State
//!
//! Shared state for the axum application: the broker itself plus server
//! configuration. The broker (and its ledger) lives for the run of the
//! server; a restart starts from an empty ledger by design.

use broker_core::{BoxedPaymentGateway, OrderBroker, OrderLedger};
use broker_razorpay::RazorpayGateway;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order broker (ledger + flows)
    pub broker: OrderBroker,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the AppState with a fresh ledger and the Razorpay gateway.
    ///
    /// Missing gateway credentials are not fatal here: the server still
    /// starts and every order-creation call fails fast with
    /// `ServiceUnavailable` until the credentials are supplied.
    pub fn new() -> Self {
        let config = AppConfig::from_env();

        let gateway: Option<BoxedPaymentGateway> = match RazorpayGateway::from_env() {
            Ok(gateway) => Some(Arc::new(gateway)),
            Err(e) => {
                tracing::warn!("Razorpay gateway not configured: {}", e);
                None
            }
        };

        let broker = OrderBroker::new(OrderLedger::new(), gateway);

        Self { broker, config }
    }

    /// Create state with an explicit broker (for testing)
    pub fn with_broker(broker: OrderBroker) -> Self {
        Self {
            broker,
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(!config.is_production());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
