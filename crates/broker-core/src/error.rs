//! # Broker Error Types
//!
//! Typed error handling for the order broker.
//! All broker operations return `Result<T, BrokerError>`.

use thiserror::Error;

/// Core error type for order creation and payment verification
#[derive(Debug, Error)]
pub enum BrokerError {
    /// Amount missing or not a valid number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Amount below the configured minimum
    #[error("Amount too small: minimum is {minimum}, received {received}")]
    AmountTooSmall { minimum: i64, received: i64 },

    /// Amount above the configured maximum
    #[error("Amount too large: maximum is {maximum}, received {received}")]
    AmountTooLarge { maximum: i64, received: i64 },

    /// Required request field missing or empty
    #[error("Missing required parameter: {field}")]
    MissingParameter { field: String },

    /// Order not present in the ledger
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Claimed signature did not match the recomputed HMAC
    #[error("Payment signature verification failed for order {order_id}")]
    SignatureMismatch { order_id: String },

    /// Server-side configuration missing (never the caller's fault)
    #[error("Server misconfigured: {0}")]
    ServerMisconfigured(String),

    /// Gateway credentials not configured; no network I/O attempted
    #[error("Payment gateway unavailable: {0}")]
    ServiceUnavailable(String),

    /// Gateway rejected the request or reported a failure
    #[error("Gateway error: {message}")]
    GatewayError { message: String },

    /// Network/HTTP error communicating with the gateway
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BrokerError {
    /// Returns true if the caller caused this error (4xx class).
    ///
    /// A failed signature check is a caller error by definition: it is a
    /// claim from an untrusted client that failed cryptographic proof,
    /// not a fault of this server.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            BrokerError::InvalidAmount(_)
                | BrokerError::AmountTooSmall { .. }
                | BrokerError::AmountTooLarge { .. }
                | BrokerError::MissingParameter { .. }
                | BrokerError::OrderNotFound { .. }
                | BrokerError::SignatureMismatch { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BrokerError::InvalidAmount(_) => 400,
            BrokerError::AmountTooSmall { .. } => 400,
            BrokerError::AmountTooLarge { .. } => 400,
            BrokerError::MissingParameter { .. } => 400,
            BrokerError::OrderNotFound { .. } => 404,
            BrokerError::SignatureMismatch { .. } => 400,
            BrokerError::ServerMisconfigured(_) => 500,
            BrokerError::ServiceUnavailable(_) => 503,
            BrokerError::GatewayError { .. } => 502,
            BrokerError::NetworkError(_) => 502,
            BrokerError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for broker operations
pub type BrokerResult<T> = Result<T, BrokerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors() {
        assert!(BrokerError::SignatureMismatch {
            order_id: "order_x".into()
        }
        .is_caller_error());
        assert!(BrokerError::AmountTooSmall {
            minimum: 100,
            received: 50
        }
        .is_caller_error());
        assert!(!BrokerError::ServerMisconfigured("no key secret".into()).is_caller_error());
        assert!(!BrokerError::GatewayError {
            message: "upstream down".into()
        }
        .is_caller_error());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            BrokerError::SignatureMismatch {
                order_id: "x".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            BrokerError::OrderNotFound {
                order_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            BrokerError::ServiceUnavailable("keys not set".into()).status_code(),
            503
        );
        assert_eq!(
            BrokerError::GatewayError {
                message: "bad request".into()
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn test_amount_message_carries_bound_and_value() {
        let err = BrokerError::AmountTooSmall {
            minimum: 100,
            received: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }
}
