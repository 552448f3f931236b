//! # Razorpay Orders API
//!
//! Gateway client for minting orders. This is the only network-facing
//! operation the broker performs; the key secret it carries is used locally
//! as the HMAC key and never leaves the process except as Basic auth toward
//! Razorpay itself.

use crate::config::RazorpayConfig;
use async_trait::async_trait;
use broker_core::{
    BrokerError, BrokerResult, GatewayOrder, GatewayOrderRequest, PaymentGateway,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Razorpay gateway client.
///
/// Carries a 30-second request timeout so a hung gateway call cannot block
/// a request forever.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayGateway {
    /// Create a new Razorpay gateway client
    pub fn new(config: RazorpayConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> BrokerResult<Self> {
        let config = RazorpayConfig::from_env()?;
        Ok(Self::new(config))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    #[instrument(skip(self, request), fields(amount = request.amount, currency = %request.currency))]
    async fn create_order(&self, request: &GatewayOrderRequest) -> BrokerResult<GatewayOrder> {
        let body = RazorpayOrderBody {
            amount: request.amount,
            currency: request.currency.as_str(),
            receipt: &request.receipt,
            payment_capture: u8::from(request.auto_capture),
        };

        debug!(receipt = %request.receipt, "Creating Razorpay order");

        let url = format!("{}/v1/orders", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| BrokerError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BrokerError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, body);

            // Razorpay wraps failures in an error envelope with a
            // human-readable description
            if let Ok(error_response) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                return Err(BrokerError::GatewayError {
                    message: error_response.error.description,
                });
            }

            return Err(BrokerError::GatewayError {
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let order: GatewayOrder = serde_json::from_str(&body).map_err(|e| {
            BrokerError::Serialization(format!("Failed to parse Razorpay response: {}", e))
        })?;

        info!(order_id = %order.id, "Created Razorpay order");

        Ok(order)
    }

    fn signing_secret(&self) -> &str {
        &self.config.key_secret
    }

    fn provider_name(&self) -> &'static str {
        "razorpay"
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct RazorpayOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    payment_capture: u8,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: RazorpayError,
}

#[derive(Debug, Deserialize)]
struct RazorpayError {
    #[serde(default)]
    code: Option<String>,
    description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use broker_core::Currency;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> RazorpayGateway {
        let config =
            RazorpayConfig::new("rzp_test_abc123", "s3cr3t").with_api_base_url(server.uri());
        RazorpayGateway::new(config)
    }

    fn order_request(amount: i64) -> GatewayOrderRequest {
        GatewayOrderRequest {
            amount,
            currency: Currency::INR,
            receipt: "rcpt_test_1".to_string(),
            auto_capture: true,
        }
    }

    #[tokio::test]
    async fn test_create_order_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .and(body_partial_json(json!({
                "amount": 50000,
                "currency": "INR",
                "receipt": "rcpt_test_1",
                "payment_capture": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "order_Mq3kZ2vX",
                "entity": "order",
                "amount": 50000,
                "amount_paid": 0,
                "currency": "INR",
                "receipt": "rcpt_test_1",
                "status": "created"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let order = gateway.create_order(&order_request(50000)).await.unwrap();

        assert_eq!(order.id, "order_Mq3kZ2vX");
        assert_eq!(order.amount, 50000);
        assert_eq!(order.currency, "INR");
        assert_eq!(order.status.as_deref(), Some("created"));
    }

    #[tokio::test]
    async fn test_error_envelope_surfaces_description() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "code": "BAD_REQUEST_ERROR",
                    "description": "Authentication failed"
                }
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let result = gateway.create_order(&order_request(50000)).await;

        match result {
            Err(BrokerError::GatewayError { message }) => {
                assert_eq!(message, "Authentication failed")
            }
            other => panic!("expected GatewayError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_envelope_failure_carries_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let result = gateway.create_order(&order_request(50000)).await;

        match result {
            Err(BrokerError::GatewayError { message }) => {
                assert!(message.contains("500"));
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected GatewayError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_serialization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server);
        let result = gateway.create_order(&order_request(50000)).await;

        assert!(matches!(result, Err(BrokerError::Serialization(_))));
    }

    #[test]
    fn test_signing_secret_is_key_secret() {
        let config = RazorpayConfig::new("rzp_test_abc123", "s3cr3t");
        let gateway = RazorpayGateway::new(config);
        assert_eq!(gateway.signing_secret(), "s3cr3t");
        assert_eq!(gateway.provider_name(), "razorpay");
    }
}
